// src/cv_analysis/analyzer.rs
use std::sync::Arc;
use tracing::info;

use super::extractor::{ExtractionClient, StructuredExtractor};
use super::recommendations::synthesize;
use crate::core::config_manager::AnalyzerConfig;
use crate::matching::{match_resume, DEFAULT_MISSING_KEYWORDS};
use crate::types::{AnalysisRecord, Document};

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub job_description: Option<String>,
    pub credential: Option<String>,
}

impl AnalysisRequest {
    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// End-to-end résumé analysis. Holds no per-call state and can be shared across tasks.
pub struct CvAnalyzer {
    extractor: StructuredExtractor,
    missing_keywords: usize,
}

impl CvAnalyzer {
    pub fn new(extractor: StructuredExtractor, missing_keywords: usize) -> Self {
        Self {
            extractor,
            missing_keywords,
        }
    }

    /// Analyzer with no extraction service; every run uses the keyword scan
    pub fn offline() -> Self {
        Self::new(
            StructuredExtractor::offline(Default::default()),
            DEFAULT_MISSING_KEYWORDS,
        )
    }

    pub fn from_config(config: &AnalyzerConfig, client: Option<Arc<dyn ExtractionClient>>) -> Self {
        Self::new(
            StructuredExtractor::new(client, config.extractor_settings()),
            config.matching.missing_keywords,
        )
    }

    pub async fn analyze(&self, document: &Document, request: &AnalysisRequest) -> AnalysisRecord {
        info!(
            "Analyzing {} ({}), job description: {}",
            document.filename,
            document.format,
            request.job_description.is_some()
        );

        let extraction = self
            .extractor
            .extract(&document.text, request.credential.as_deref())
            .await;

        let match_result = match_resume(
            &document.text,
            request.job_description.as_deref(),
            self.missing_keywords,
        );

        let language = self.extractor.language();
        let recommendations = synthesize(&extraction, Some(&match_result), language);

        info!(
            "Analysis of {} completed: score {}, {} recommendations, ai: {}",
            document.filename,
            match_result.score,
            recommendations.len(),
            extraction.is_ai()
        );

        AnalysisRecord {
            filename: document.filename.clone(),
            format: document.format,
            keywords: extraction.skills().to_vec(),
            structure: extraction.structure(language),
            recommendations,
            match_score: match_result.score,
            missing_keywords: match_result.missing_keywords,
            ai_extracted: extraction.raw().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv_analysis::extractor::tests::StubClient;
    use crate::cv_analysis::extractor::ExtractorSettings;
    use crate::types::DocumentFormat;

    fn cv(text: &str) -> Document {
        Document::new(text, "cv.pdf", DocumentFormat::Pdf)
    }

    #[tokio::test]
    async fn test_offline_without_job_description() {
        let analyzer = CvAnalyzer::offline();
        let record = analyzer
            .analyze(
                &cv("Candidate Name: John Doe\nSkills: Python, React, SQL"),
                &AnalysisRequest::default(),
            )
            .await;

        assert_eq!(record.keywords, vec!["Python", "React", "Sql"]);
        assert_eq!(record.structure, "Detected sections: Skills");
        assert_eq!(record.match_score, 0.0);
        assert!(record.missing_keywords.is_empty());
        assert!(record.ai_extracted.is_none());
        assert_eq!(record.format, DocumentFormat::Pdf);
    }

    #[tokio::test]
    async fn test_ai_payload_flows_into_record() {
        let client = Arc::new(StubClient::replying(
            r#"{"skills":["Rust"],"experience_years":2,"last_role":null,"summary":""}"#,
        ));
        let analyzer = CvAnalyzer::new(
            StructuredExtractor::new(Some(client), ExtractorSettings::default()),
            5,
        );

        let request = AnalysisRequest::default()
            .with_credential("key")
            .with_job_description("rust kafka");
        let record = analyzer.analyze(&cv("rust services"), &request).await;

        assert_eq!(record.keywords, vec!["Rust"]);
        assert_eq!(record.structure, "Experience: 2 years");
        assert_eq!(record.missing_keywords, vec!["kafka"]);
        assert_eq!(
            record.recommendations,
            vec![
                "Add more specific technical skills.",
                "Important keywords are missing: kafka",
            ]
        );
        assert_eq!(record.ai_extracted.unwrap()["experience_years"], 2);
    }

    #[tokio::test]
    async fn test_concurrent_analyses_share_one_analyzer() {
        let analyzer = Arc::new(CvAnalyzer::offline());
        let mut handles = Vec::new();
        for i in 0..8 {
            let analyzer = analyzer.clone();
            handles.push(tokio::spawn(async move {
                let request = AnalysisRequest::default().with_job_description("docker aws");
                analyzer
                    .analyze(&cv(&format!("candidate {} knows docker", i)), &request)
                    .await
            }));
        }
        for handle in handles {
            let record = handle.await.unwrap();
            assert_eq!(record.missing_keywords, vec!["aws"]);
        }
    }
}
