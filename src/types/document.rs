// src/types/document.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::validate_file_extension;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Source format of the file the text was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Txt => "TXT",
        }
    }

    /// Derive the format from a filename such as `resume.DOCX`
    pub fn from_filename(filename: &str) -> Result<Self> {
        let ext = validate_file_extension(filename, &SUPPORTED_EXTENSIONS)?;
        ext.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => anyhow::bail!(
                "Unsupported document format: {}. Use pdf, docx, or txt",
                other
            ),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text already decoded upstream, plus where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub filename: String,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(text: impl Into<String>, filename: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            text: text.into(),
            filename: filename.into(),
            format,
        }
    }
}
