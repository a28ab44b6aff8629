// src/matching/gap_ranker.rs
use anyhow::{Context, Result};
use tracing::{debug, error};

use super::vectorizer::TfidfMatrix;

pub const DEFAULT_MISSING_KEYWORDS: usize = 5;

// Terms this short are usually noise ("js", "ui", ...).
const MIN_KEYWORD_CHARS: usize = 3;

/// Highest-weighted job-description terms that the résumé does not mention.
///
/// Weights come from the job description alone, so they reduce to normalized
/// term frequency. A term counts as present when it occurs anywhere in the
/// lower-cased résumé, even inside a longer word. Errors yield an empty list.
pub fn get_missing_keywords(resume_text: &str, job_description: &str, top_n: usize) -> Vec<String> {
    match try_missing_keywords(resume_text, job_description, top_n) {
        Ok(missing) => {
            debug!("Missing keywords: {:?}", missing);
            missing
        }
        Err(e) => {
            error!("Error extracting missing keywords: {:#}", e);
            Vec::new()
        }
    }
}

fn try_missing_keywords(resume_text: &str, job_description: &str, top_n: usize) -> Result<Vec<String>> {
    if top_n == 0 || job_description.trim().is_empty() {
        return Ok(Vec::new());
    }

    let matrix = TfidfMatrix::fit_transform(&[job_description])
        .context("Failed to vectorize job description")?;
    let row = matrix
        .rows
        .first()
        .context("Vectorizer returned no rows")?;

    // BTreeMap iteration is in vocabulary order; the stable sort keeps it for ties.
    let mut ranked: Vec<(usize, f64)> = row
        .iter()
        .filter(|(_, weight)| **weight > 0.0)
        .map(|(&i, &weight)| (i, weight))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let resume_lower = resume_text.to_lowercase();

    Ok(ranked
        .into_iter()
        .map(|(i, _)| &matrix.vocabulary[i])
        .filter(|term| term.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|term| !resume_lower.contains(term.as_str()))
        .take(top_n)
        .cloned()
        .collect())
}
