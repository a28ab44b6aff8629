use serde::{Deserialize, Serialize};

use super::document::DocumentFormat;

// ===== Matching Result =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub missing_keywords: Vec<String>,
}

// ===== Analysis Record =====

/// Everything the analysis hands back for persistence or display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub filename: String,
    pub format: DocumentFormat,
    pub keywords: Vec<String>,
    pub structure: String,
    pub recommendations: Vec<String>,
    pub match_score: f64,
    pub missing_keywords: Vec<String>,
    pub ai_extracted: Option<serde_json::Value>,
}

impl AnalysisRecord {
    pub fn match_result(&self) -> MatchResult {
        MatchResult {
            score: self.match_score,
            missing_keywords: self.missing_keywords.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_to_flat_mapping() {
        let record = AnalysisRecord {
            filename: "cv.pdf".to_string(),
            format: DocumentFormat::Pdf,
            keywords: vec!["Python".to_string()],
            structure: "Detected sections: Skills".to_string(),
            recommendations: vec![],
            match_score: 42.5,
            missing_keywords: vec!["docker".to_string()],
            ai_extracted: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["format"], json!("PDF"));
        assert_eq!(value["match_score"], json!(42.5));
        assert_eq!(value["missing_keywords"], json!(["docker"]));
        assert!(value["ai_extracted"].is_null());
        assert_eq!(record.match_result().score, 42.5);
    }
}
