// src/core/config_manager.rs
//! Analyzer configuration: optional YAML file, overridden by environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::cv_analysis::extractor::{ExtractorSettings, DEFAULT_MAX_INPUT_CHARS};
use crate::cv_analysis::messages::Language;
use crate::matching::DEFAULT_MISSING_KEYWORDS;

pub const DEFAULT_EXTRACTION_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_EXTRACTION_MODEL: &str = "llama3-70b-8192";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub max_input_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_EXTRACTION_URL.to_string(),
            model: DEFAULT_EXTRACTION_MODEL.to_string(),
            temperature: 0.1,
            timeout_seconds: 30,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub missing_keywords: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            missing_keywords: DEFAULT_MISSING_KEYWORDS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub extraction: ExtractionConfig,
    pub matching: MatchingConfig,
    pub language: Language,
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.extraction.timeout_seconds)
    }

    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            default_credential: self.extraction.api_key.clone(),
            max_input_chars: self.extraction.max_input_chars,
            timeout: self.timeout(),
            language: self.language,
        }
    }

    /// Copy safe to print: the credential is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.extraction.api_key.is_some() {
            copy.extraction.api_key = Some("***".to_string());
        }
        copy
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from `path` (or `ATS_CONFIG_FILE`) and the process environment
    pub fn load(path: Option<&Path>) -> Result<AnalyzerConfig> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("ATS_CONFIG_FILE").ok().map(PathBuf::from));

        let base = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => AnalyzerConfig::default(),
        };

        let config = Self::apply_env(base, |key| std::env::var(key).ok())?;
        info!(
            "Configuration loaded: model {}, AI extraction {}",
            config.extraction.model,
            if config.extraction.api_key.is_some() { "enabled" } else { "disabled" }
        );
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<AnalyzerConfig> {
        info!("Loading configuration file: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse_yaml(content: &str) -> Result<AnalyzerConfig> {
        if content.trim().is_empty() {
            return Ok(AnalyzerConfig::default());
        }
        serde_yaml::from_str(content).context("Invalid YAML configuration")
    }

    /// Override `config` with any variables `lookup` knows about
    pub fn apply_env<F>(mut config: AnalyzerConfig, lookup: F) -> Result<AnalyzerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("GROQ_API_KEY") {
            config.extraction.api_key = Some(key);
        }
        if let Some(url) = lookup("ATS_EXTRACTION_URL") {
            config.extraction.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("ATS_EXTRACTION_MODEL") {
            config.extraction.model = model;
        }
        if let Some(value) = lookup("ATS_EXTRACTION_TEMPERATURE") {
            config.extraction.temperature = parse_var("ATS_EXTRACTION_TEMPERATURE", &value)?;
        }
        if let Some(value) = lookup("ATS_EXTRACTION_TIMEOUT_SECS") {
            config.extraction.timeout_seconds = parse_var("ATS_EXTRACTION_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("ATS_MAX_INPUT_CHARS") {
            config.extraction.max_input_chars = parse_var("ATS_MAX_INPUT_CHARS", &value)?;
        }
        if let Some(value) = lookup("ATS_MISSING_KEYWORDS") {
            config.matching.missing_keywords = parse_var("ATS_MISSING_KEYWORDS", &value)?;
        }
        if let Some(value) = lookup("ATS_LANGUAGE") {
            config.language = Language::parse(Some(&value));
        }

        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("{} must be a valid number, got {:?}", name, value))
}
