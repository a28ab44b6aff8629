//! Résumé relevance engine: keyword extraction, structure detection,
//! TF-IDF match scoring against a job description and keyword-gap advice.

pub mod core;
pub mod cv_analysis;
pub mod matching;
pub mod types;
pub mod utils;

use std::sync::Arc;

use anyhow::Result;

pub use crate::core::{AnalyzerConfig, ConfigManager, ServiceClient};
pub use cv_analysis::{AnalysisRequest, CvAnalyzer, Extraction, ExtractionClient, Language};
pub use matching::{calculate_match_score, get_missing_keywords};
pub use types::{AnalysisRecord, Document, DocumentFormat, MatchResult};

/// Build an analyzer wired to the configured extraction service
pub fn build_analyzer(config: &AnalyzerConfig) -> Result<CvAnalyzer> {
    let client: Arc<dyn ExtractionClient> = Arc::new(ServiceClient::new(&config.extraction)?);
    Ok(CvAnalyzer::from_config(config, Some(client)))
}

/// Convenience function for a one-off analysis
pub async fn analyze_cv_text(
    config: &AnalyzerConfig,
    document: &Document,
    job_description: Option<&str>,
    credential: Option<&str>,
) -> Result<AnalysisRecord> {
    let analyzer = build_analyzer(config)?;
    let request = AnalysisRequest {
        job_description: job_description.map(str::to_string),
        credential: credential.map(str::to_string),
    };
    Ok(analyzer.analyze(document, &request).await)
}
