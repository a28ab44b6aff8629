// src/cv_analysis/messages.rs
//! User-facing strings, one catalogue per supported language

use serde::{Deserialize, Serialize};

use crate::utils::{format_years, normalize_language};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn parse(lang: Option<&str>) -> Self {
        match normalize_language(lang).as_str() {
            "es" => Language::Es,
            _ => Language::En,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::En => &ENGLISH,
            Language::Es => &SPANISH,
        }
    }
}

pub struct Messages {
    pub no_keyword_detected: &'static str,
    pub no_sections: &'static str,
    pub detected_sections: &'static str,
    pub basic_structure: &'static str,
    pub experience_label: &'static str,
    pub years_unit: &'static str,
    pub last_role_label: &'static str,
    pub summary_detected: &'static str,
    pub no_clear_skills: &'static str,
    pub add_specific_skills: &'static str,
    pub experience_unclear: &'static str,
    pub add_more_keywords: &'static str,
    pub good_keyword_use: &'static str,
    pub add_experience_section: &'static str,
    pub add_summary_section: &'static str,
    pub missing_keywords: &'static str,
}

static ENGLISH: Messages = Messages {
    no_keyword_detected: "(No keywords detected)",
    no_sections: "(None)",
    detected_sections: "Detected sections",
    basic_structure: "Basic structure",
    experience_label: "Experience",
    years_unit: "years",
    last_role_label: "Last role",
    summary_detected: "Summary detected",
    no_clear_skills: "No clear technical skills were detected.",
    add_specific_skills: "Add more specific technical skills.",
    experience_unclear: "Years of experience could not be clearly detected.",
    add_more_keywords: "Add more relevant keywords.",
    good_keyword_use: "Good use of keywords.",
    add_experience_section: "Include an experience section.",
    add_summary_section: "Include a professional summary.",
    missing_keywords: "Important keywords are missing",
};

static SPANISH: Messages = Messages {
    no_keyword_detected: "(Ninguna keyword detectada)",
    no_sections: "(Ninguna)",
    detected_sections: "Secciones detectadas",
    basic_structure: "Estructura básica",
    experience_label: "Experiencia",
    years_unit: "años",
    last_role_label: "Último Rol",
    summary_detected: "Resumen detectado",
    no_clear_skills: "No se detectaron habilidades técnicas claras.",
    add_specific_skills: "Agrega más habilidades técnicas específicas.",
    experience_unclear: "No se detectó claramente los años de experiencia.",
    add_more_keywords: "Agrega más keywords relevantes.",
    good_keyword_use: "Buen uso de keywords.",
    add_experience_section: "Incluye sección de experiencia.",
    add_summary_section: "Incluye un resumen profesional.",
    missing_keywords: "Faltan palabras clave importantes",
};

impl Messages {
    pub fn sections_line(&self, sections: &[String]) -> String {
        let listed = if sections.is_empty() {
            self.no_sections.to_string()
        } else {
            sections.join(", ")
        };
        format!("{}: {}", self.detected_sections, listed)
    }

    pub fn experience_line(&self, years: f64) -> String {
        format!("{}: {} {}", self.experience_label, format_years(years), self.years_unit)
    }

    pub fn last_role_line(&self, role: &str) -> String {
        format!("{}: {}", self.last_role_label, role)
    }

    pub fn missing_keywords_line(&self, keywords: &[String]) -> String {
        format!("{}: {}", self.missing_keywords, keywords.join(", "))
    }
}
