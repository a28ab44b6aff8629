// src/types/mod.rs
//! Plain data carried across the analysis boundary

pub mod document;
pub mod response;

pub use document::{Document, DocumentFormat};
pub use response::{AnalysisRecord, MatchResult};
