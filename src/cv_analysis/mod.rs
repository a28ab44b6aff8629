// src/cv_analysis/mod.rs
//! Résumé analysis: extraction, recommendations and the end-to-end pipeline

pub mod analyzer;
pub mod extractor;
pub mod messages;
pub mod recommendations;

pub use analyzer::{AnalysisRequest, CvAnalyzer};
pub use extractor::{
    AiExtraction, Extraction, ExtractionClient, ExtractorSettings, FallbackExtraction,
    StructuredExtractor,
};
pub use messages::Language;
pub use recommendations::synthesize;
