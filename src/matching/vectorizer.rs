// src/matching/vectorizer.rs
//! TF-IDF vectorization over a small in-memory corpus

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::stop_words::is_stop_word;

// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\w\w+\b").unwrap_or_else(|e| panic!("invalid token pattern: {}", e))
});

/// Lower-case the text, split it into word tokens and drop stop words
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Sparse document vector, indexed by vocabulary position.
pub type SparseVector = BTreeMap<usize, f64>;

/// Fitted TF-IDF model. Vocabulary is sorted alphabetically, so indexes are stable.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    /// Fit on `documents` and return one L2-normalized row per document.
    ///
    /// Uses smoothed IDF, `ln((1 + n) / (1 + df)) + 1`. Fails when no document
    /// contributes a single token.
    pub fn fit_transform(documents: &[&str]) -> Result<Self> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            anyhow::bail!("empty vocabulary; perhaps the documents only contain stop words");
        }

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let counts: Vec<HashMap<usize, f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut tf = HashMap::new();
                for token in tokens {
                    if let Some(&i) = index.get(token.as_str()) {
                        *tf.entry(i).or_insert(0.0) += 1.0;
                    }
                }
                tf
            })
            .collect();

        let n_docs = documents.len() as f64;
        let mut doc_freq = vec![0.0_f64; vocabulary.len()];
        for tf in &counts {
            for &i in tf.keys() {
                doc_freq[i] += 1.0;
            }
        }
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|tf| {
                let mut row: SparseVector =
                    tf.into_iter().map(|(i, count)| (i, count * idf[i])).collect();
                let norm = l2_norm(&row);
                if norm > 0.0 {
                    for weight in row.values_mut() {
                        *weight /= norm;
                    }
                }
                row
            })
            .collect();

        Ok(Self { vocabulary, rows })
    }
}

pub fn l2_norm(v: &SparseVector) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine of the angle between two sparse vectors; 0 when either has no weight
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(i, wa)| b.get(i).map(|wb| wa * wb))
        .sum();

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("We need a Python backend engineer, with C and FastAPI!");
        assert_eq!(tokens, vec!["need", "python", "backend", "engineer", "fastapi"]);
    }

    #[test]
    fn test_vocabulary_is_sorted_and_rows_normalized() {
        let matrix = TfidfMatrix::fit_transform(&["rust tokio rust", "tokio axum"]).unwrap();
        assert_eq!(matrix.vocabulary, vec!["axum", "rust", "tokio"]);
        for row in &matrix.rows {
            assert!((l2_norm(row) - 1.0).abs() < 1e-9);
        }
        // "axum" only appears in the second document.
        assert!(!matrix.rows[0].contains_key(&0));
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let matrix = TfidfMatrix::fit_transform(&["rust java", "rust"]).unwrap();
        let first = &matrix.rows[0];
        // rust (shared) weighs less than java (unique) in the first document.
        assert!(first[&1] < first[&0]);
    }

    #[test]
    fn test_stop_word_only_corpus_is_an_error() {
        assert!(TfidfMatrix::fit_transform(&["the and of", "a an"]).is_err());
        assert!(TfidfMatrix::fit_transform(&[""]).is_err());
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        let a: SparseVector = [(0, 1.0), (1, 1.0)].into_iter().collect();
        let b: SparseVector = [(2, 3.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&a, &SparseVector::new()), 0.0);
    }
}
