//! End-to-end analysis scenarios against the public library API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cv_analyzer::cv_analysis::{ExtractorSettings, StructuredExtractor};
use cv_analyzer::{
    calculate_match_score, get_missing_keywords, AnalysisRequest, CvAnalyzer, Document,
    DocumentFormat, ExtractionClient,
};

struct UnreachableService;

#[async_trait]
impl ExtractionClient for UnreachableService {
    async fn complete_json(&self, _prompt: &str, _credential: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection reset by peer")
    }
}

struct HangingService;

#[async_trait]
impl ExtractionClient for HangingService {
    async fn complete_json(&self, _prompt: &str, _credential: &str) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("{\"skills\":[\"Never\"]}".to_string())
    }
}

fn analyzer_with(client: Arc<dyn ExtractionClient>, timeout: Duration) -> CvAnalyzer {
    CvAnalyzer::new(
        StructuredExtractor::new(
            Some(client),
            ExtractorSettings {
                default_credential: Some("gsk_configured".to_string()),
                timeout,
                ..ExtractorSettings::default()
            },
        ),
        5,
    )
}

#[tokio::test]
async fn scenario_a_fallback_without_job_description() {
    let document = Document::new(
        "Candidate Name: John Doe\nSkills: Python, React, SQL",
        "john_doe.txt",
        DocumentFormat::Txt,
    );

    let record = CvAnalyzer::offline()
        .analyze(&document, &AnalysisRequest::default())
        .await;

    assert!(record.keywords.contains(&"Python".to_string()));
    assert!(record.keywords.contains(&"React".to_string()));
    assert_eq!(record.match_score, 0.0);
    assert!(record.missing_keywords.is_empty());
    assert!(record.ai_extracted.is_none());
    assert_eq!(record.filename, "john_doe.txt");
}

#[tokio::test]
async fn scenario_b_scores_overlap_and_reports_gaps() {
    let jd = "We need a python backend engineer with fastapi and docker experience";
    let document = Document::new("python django api", "cv.pdf", DocumentFormat::Pdf);

    let record = CvAnalyzer::offline()
        .analyze(&document, &AnalysisRequest::default().with_job_description(jd))
        .await;

    assert!(record.match_score > 0.0 && record.match_score <= 100.0);
    assert!(
        record.missing_keywords.contains(&"fastapi".to_string())
            || record.missing_keywords.contains(&"docker".to_string())
    );
    assert!(!record.missing_keywords.contains(&"python".to_string()));
    assert!(record
        .recommendations
        .last()
        .is_some_and(|r| r.starts_with("Important keywords are missing: ")));
}

#[tokio::test]
async fn scenario_c_service_failure_degrades_to_fallback() {
    let document = Document::new("Experience\nDocker and AWS", "cv.docx", DocumentFormat::Docx);

    for client in [
        Arc::new(UnreachableService) as Arc<dyn ExtractionClient>,
        Arc::new(HangingService) as Arc<dyn ExtractionClient>,
    ] {
        let record = analyzer_with(client, Duration::from_millis(50))
            .analyze(&document, &AnalysisRequest::default())
            .await;

        assert!(record.ai_extracted.is_none());
        assert_eq!(record.keywords, vec!["Docker", "Aws"]);
        assert_eq!(record.structure, "Detected sections: Experience");
    }
}

#[tokio::test]
async fn repeated_analysis_is_idempotent() {
    let analyzer = CvAnalyzer::offline();
    let document = Document::new(
        "Summary: data engineer. Experience with SQL, Python and AWS.",
        "cv.pdf",
        DocumentFormat::Pdf,
    );
    let request = AnalysisRequest::default()
        .with_job_description("Data engineer: spark, airflow, sql and aws pipelines");

    let first = analyzer.analyze(&document, &request).await;
    let second = analyzer.analyze(&document, &request).await;

    assert_eq!(first, second);
}

#[test]
fn scoring_properties_hold() {
    let resume = "Rust developer, tokio, axum, postgres, kubernetes";
    let jd = "Looking for a Rust engineer: tokio, kafka, kubernetes, terraform";

    let score = calculate_match_score(resume, jd);
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(calculate_match_score("", jd), 0.0);
    assert_eq!(calculate_match_score(resume, ""), 0.0);
    assert!((calculate_match_score(jd, jd) - 100.0).abs() < 0.01);

    let resume_lower = resume.to_lowercase();
    for n in 0..6 {
        let missing = get_missing_keywords(resume, jd, n);
        assert!(missing.len() <= n);
        assert!(missing.iter().all(|term| !resume_lower.contains(term.as_str())));
    }
}
