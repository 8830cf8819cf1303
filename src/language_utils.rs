use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language utilities for locale handling
///
/// This module defines the fixed set of locales pages are translated into and
/// provides validation of ISO 639-1 (2-letter) language codes.
/// Locale a page can be translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLocale {
    /// French, written under `fr/`
    Fr,
    /// Spanish, written under `es/`
    Es,
}

impl TargetLocale {
    /// All supported locales, in processing order
    pub const ALL: [TargetLocale; 2] = [TargetLocale::Fr, TargetLocale::Es];

    // @returns: Lowercase code, used for the output directory and the `lang` field
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    // @returns: Uppercase code expected by the translation API
    pub fn api_code(&self) -> &'static str {
        match self {
            Self::Fr => "FR",
            Self::Es => "ES",
        }
    }

    // @returns: English language name
    pub fn display_name(&self) -> &'static str {
        Language::from_639_1(self.code())
            .map(|language| language.to_name())
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for TargetLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for TargetLocale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fr" => Ok(Self::Fr),
            "es" => Ok(Self::Es),
            _ => Err(anyhow!("Unsupported target locale: {}", s)),
        }
    }
}

/// Validate that a code is an ISO 639-1 language code (case-insensitive)
pub fn validate_language_code(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(language) = Language::from_639_1(&normalized_code) {
            return Ok(language);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}
