// src/cv_analysis/recommendations.rs
use super::extractor::Extraction;
use super::messages::Language;
use crate::types::MatchResult;

const SPARSE_AI_SKILLS: usize = 5;
const SPARSE_FALLBACK_SKILLS: usize = 3;
const QUOTED_MISSING_KEYWORDS: usize = 3;

/// Guidance strings for the candidate, extraction advice first and keyword gaps last
pub fn synthesize(
    extraction: &Extraction,
    match_result: Option<&MatchResult>,
    language: Language,
) -> Vec<String> {
    let messages = language.messages();
    let mut recommendations = Vec::new();

    match extraction {
        Extraction::Ai(ai) => {
            if ai.skills.is_empty() {
                recommendations.push(messages.no_clear_skills);
            }
            if ai.skills.len() < SPARSE_AI_SKILLS {
                recommendations.push(messages.add_specific_skills);
            }
            if ai.experience_years.map_or(true, |years| years == 0.0) {
                recommendations.push(messages.experience_unclear);
            }
        }
        Extraction::Fallback(fallback) => {
            recommendations.push(if fallback.matched_skills < SPARSE_FALLBACK_SKILLS {
                messages.add_more_keywords
            } else {
                messages.good_keyword_use
            });
            if !fallback.has_experience_section {
                recommendations.push(messages.add_experience_section);
            }
            if !fallback.has_summary_section {
                recommendations.push(messages.add_summary_section);
            }
        }
    }

    let mut recommendations: Vec<String> =
        recommendations.into_iter().map(str::to_string).collect();

    if let Some(result) = match_result.filter(|m| !m.missing_keywords.is_empty()) {
        let top = &result.missing_keywords
            [..result.missing_keywords.len().min(QUOTED_MISSING_KEYWORDS)];
        recommendations.push(messages.missing_keywords_line(top));
    }

    recommendations
}
