// src/matching/scorer.rs
use anyhow::{Context, Result};
use tracing::{debug, error};

use super::vectorizer::{cosine_similarity, TfidfMatrix};

/// Relevance of a résumé to a job description as a 0-100 percentage.
///
/// Never fails: empty inputs and vectorization errors both yield `0.0`.
pub fn calculate_match_score(resume_text: &str, job_description: &str) -> f64 {
    if resume_text.is_empty() || job_description.is_empty() {
        return 0.0;
    }

    match try_match_score(resume_text, job_description) {
        Ok(score) => {
            debug!("Match score computed: {}", score);
            score
        }
        Err(e) => {
            error!("Error formulating match score: {:#}", e);
            0.0
        }
    }
}

fn try_match_score(resume_text: &str, job_description: &str) -> Result<f64> {
    let matrix = TfidfMatrix::fit_transform(&[resume_text, job_description])
        .context("Failed to vectorize resume and job description")?;

    let similarity = cosine_similarity(&matrix.rows[0], &matrix.rows[1]);
    let percentage = (similarity * 100.0).clamp(0.0, 100.0);

    Ok((percentage * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(calculate_match_score("", "python developer"), 0.0);
        assert_eq!(calculate_match_score("python developer", ""), 0.0);
        assert_eq!(calculate_match_score("", ""), 0.0);
    }

    #[test]
    fn test_identical_text_scores_hundred() {
        let text = "Senior Rust engineer building async services with tokio and axum";
        let score = calculate_match_score(text, text);
        assert!((score - 100.0).abs() < 0.01, "score was {}", score);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        assert_eq!(calculate_match_score("python django", "kotlin android"), 0.0);
    }

    #[test]
    fn test_stop_words_only_maps_to_zero() {
        assert_eq!(calculate_match_score("the and of", "with a the"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_within_bounds() {
        let score = calculate_match_score(
            "python django api",
            "We need a python backend engineer with fastapi and docker experience",
        );
        assert!(score > 0.0 && score < 100.0, "score was {}", score);
        assert_eq!(score, (score * 100.0).round() / 100.0);
    }
}
