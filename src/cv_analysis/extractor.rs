// src/cv_analysis/extractor.rs
//! Structured résumé extraction: language-model first, keyword scan as fallback

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::messages::Language;
use crate::utils::{capitalize, truncate_chars};

pub const DEFAULT_MAX_INPUT_CHARS: usize = 15_000;

const SKILL_TERMS: [&str; 9] = [
    "python",
    "react",
    "fastapi",
    "sql",
    "docker",
    "aws",
    "javascript",
    "html",
    "css",
];

const SECTION_TERMS: [&str; 8] = [
    "experiencia",
    "experience",
    "educación",
    "education",
    "skills",
    "habilidades",
    "summary",
    "resumen",
];

const EXPERIENCE_SECTIONS: [&str; 2] = ["experiencia", "experience"];
const SUMMARY_SECTIONS: [&str; 2] = ["summary", "resumen"];

/// Port to a chat-completion style service that answers with a JSON document.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Send `prompt` authorized by `credential` and return the raw message content
    async fn complete_json(&self, prompt: &str, credential: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiExtraction {
    pub name: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub last_role: Option<String>,
    pub summary: Option<String>,
    /// Unmodified service payload
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackExtraction {
    /// Matched dictionary terms, or the single "no keyword" marker
    pub skills: Vec<String>,
    pub matched_skills: usize,
    pub sections: Vec<String>,
    pub has_experience_section: bool,
    pub has_summary_section: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Ai(AiExtraction),
    Fallback(FallbackExtraction),
}

impl Extraction {
    pub fn skills(&self) -> &[String] {
        match self {
            Extraction::Ai(ai) => &ai.skills,
            Extraction::Fallback(fallback) => &fallback.skills,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Extraction::Ai(ai) => Some(&ai.raw),
            Extraction::Fallback(_) => None,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Extraction::Ai(_))
    }

    /// Human-readable description of what was found
    pub fn structure(&self, language: Language) -> String {
        let messages = language.messages();
        match self {
            Extraction::Ai(ai) => {
                let mut items = Vec::new();
                if let Some(years) = ai.experience_years.filter(|y| *y > 0.0) {
                    items.push(messages.experience_line(years));
                }
                if let Some(role) = &ai.last_role {
                    items.push(messages.last_role_line(role));
                }
                if ai.summary.is_some() {
                    items.push(messages.summary_detected.to_string());
                }
                if items.is_empty() {
                    messages.basic_structure.to_string()
                } else {
                    items.join(", ")
                }
            }
            Extraction::Fallback(fallback) => messages.sections_line(&fallback.sections),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    pub default_credential: Option<String>,
    pub max_input_chars: usize,
    pub timeout: Duration,
    pub language: Language,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            default_credential: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            timeout: Duration::from_secs(30),
            language: Language::En,
        }
    }
}

pub struct StructuredExtractor {
    client: Option<Arc<dyn ExtractionClient>>,
    settings: ExtractorSettings,
}

impl StructuredExtractor {
    pub fn new(client: Option<Arc<dyn ExtractionClient>>, settings: ExtractorSettings) -> Self {
        Self { client, settings }
    }

    /// Extractor that never calls out and always uses the keyword scan
    pub fn offline(language: Language) -> Self {
        Self::new(
            None,
            ExtractorSettings {
                language,
                ..ExtractorSettings::default()
            },
        )
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    /// Extract structured data from `resume_text`. Never fails.
    pub async fn extract(&self, resume_text: &str, credential: Option<&str>) -> Extraction {
        let credential = credential
            .filter(|c| !c.trim().is_empty())
            .or(self.settings.default_credential.as_deref().filter(|c| !c.trim().is_empty()));

        let (client, credential) = match (&self.client, credential) {
            (Some(client), Some(credential)) => (client, credential),
            (None, _) => {
                debug!("No extraction client configured, using keyword scan");
                return Extraction::Fallback(self.fallback(resume_text));
            }
            (_, None) => {
                info!("No extraction credential available, using keyword scan");
                return Extraction::Fallback(self.fallback(resume_text));
            }
        };

        match self.try_ai(client.as_ref(), resume_text, credential).await {
            Ok(ai) => {
                info!("AI extraction succeeded with {} skills", ai.skills.len());
                Extraction::Ai(ai)
            }
            Err(e) => {
                warn!("AI extraction failed, using keyword scan: {:#}", e);
                Extraction::Fallback(self.fallback(resume_text))
            }
        }
    }

    async fn try_ai(
        &self,
        client: &dyn ExtractionClient,
        resume_text: &str,
        credential: &str,
    ) -> Result<AiExtraction> {
        let prompt = build_extraction_prompt(truncate_chars(
            resume_text,
            self.settings.max_input_chars,
        ));

        let content = tokio::time::timeout(
            self.settings.timeout,
            client.complete_json(&prompt, credential),
        )
        .await
        .with_context(|| {
            format!(
                "Extraction service timed out after {}s",
                self.settings.timeout.as_secs_f64()
            )
        })?
        .context("Extraction service call failed")?;

        let raw: Value = serde_json::from_str(content.trim())
            .context("Extraction service returned invalid JSON")?;

        parse_ai_payload(raw)
    }

    /// Deterministic dictionary scan over the lower-cased text
    pub fn fallback(&self, resume_text: &str) -> FallbackExtraction {
        let lower = resume_text.to_lowercase();
        let found = |terms: &[&str]| -> Vec<String> {
            terms
                .iter()
                .filter(|term| lower.contains(*term))
                .map(|term| capitalize(term))
                .collect()
        };

        let matched = found(&SKILL_TERMS);
        let matched_skills = matched.len();
        let skills = if matched.is_empty() {
            vec![self
                .settings
                .language
                .messages()
                .no_keyword_detected
                .to_string()]
        } else {
            matched
        };

        FallbackExtraction {
            skills,
            matched_skills,
            sections: found(&SECTION_TERMS),
            has_experience_section: EXPERIENCE_SECTIONS.iter().any(|s| lower.contains(s)),
            has_summary_section: SUMMARY_SECTIONS.iter().any(|s| lower.contains(s)),
        }
    }
}

pub fn build_extraction_prompt(resume_text: &str) -> String {
    format!(
        r#"You are an expert ATS parser. Extract the following information from the Resume text below and return it strictly as a valid JSON object.

Fields to extract:
- name: Candidate's full name (string)
- email: Email address (string)
- skills: List of technical skills (list of strings)
- experience_years: Estimated total years of experience (number, 0 if unknown)
- last_role: Most recent job title (string, or null)
- summary: A brief professional summary generated from the text (string)

Rules:
- Do not include any markdown formatting like ```json ... ```. Just return the raw JSON string.
- If a field is not found, use null or empty list/string as appropriate.

Resume Text:
{}"#,
        resume_text
    )
}

/// Decode the service payload, keeping the original JSON alongside
pub fn parse_ai_payload(raw: Value) -> Result<AiExtraction> {
    let object = match raw.as_object() {
        Some(object) if !object.is_empty() => object,
        Some(_) => anyhow::bail!("Extraction service returned an empty object"),
        None => anyhow::bail!("Extraction service returned a non-object JSON value"),
    };

    Ok(AiExtraction {
        name: non_empty_string(object, "name"),
        email: non_empty_string(object, "email"),
        skills: dedup_skills(object.get("skills")),
        experience_years: experience_years(object.get("experience_years")),
        last_role: non_empty_string(object, "last_role"),
        summary: non_empty_string(object, "summary"),
        raw,
    })
}

fn non_empty_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn dedup_skills(value: Option<&Value>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter(|s| seen.insert(s.to_lowercase()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn experience_years(value: Option<&Value>) -> Option<f64> {
    let years = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (years.is_finite() && years >= 0.0).then_some(years)
}
