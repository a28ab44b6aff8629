// src/matching/mod.rs
//! Vector-space matching between a résumé and a job description

pub mod gap_ranker;
pub mod scorer;
pub mod stop_words;
pub mod vectorizer;

pub use gap_ranker::{get_missing_keywords, DEFAULT_MISSING_KEYWORDS};
pub use scorer::calculate_match_score;

use crate::types::MatchResult;

/// Score and gap list together, or the zero result when no job description is given
pub fn match_resume(resume_text: &str, job_description: Option<&str>, top_n: usize) -> MatchResult {
    match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => MatchResult {
            score: calculate_match_score(resume_text, jd),
            missing_keywords: get_missing_keywords(resume_text, jd, top_n),
        },
        None => MatchResult::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_job_description_is_zero_result() {
        assert_eq!(match_resume("python", None, 5), MatchResult::default());
        assert_eq!(match_resume("python", Some("   "), 5), MatchResult::default());
    }

    #[test]
    fn test_job_description_populates_both_fields() {
        let result = match_resume("python django", Some("python docker"), 5);
        assert!(result.score > 0.0);
        assert_eq!(result.missing_keywords, vec!["docker"]);
    }
}
