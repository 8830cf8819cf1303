use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use crate::language_utils::{self, TargetLocale};

/// Application configuration module
/// This module handles the application configuration: which pages to
/// translate, where they live, which locales to produce and how to reach
/// the translation provider.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory the page paths are relative to
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Source language code (ISO 639-1, sent uppercase to the provider)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Pages to translate, relative to the project root
    #[serde(default = "default_pages")]
    pub pages: Vec<PathBuf>,

    /// Locales to produce, in processing order
    #[serde(default = "default_target_locales")]
    pub target_locales: Vec<TargetLocale>,

    /// Translation provider config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: API key (usually supplied through DEEPL_API_KEY instead)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL; derived from the key type when empty
    #[serde(default)]
    pub endpoint: Option<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Ask the provider to keep whitespace and punctuation as is
    #[serde(default = "default_true")]
    pub preserve_formatting: bool,

    // @field: Markup the provider should parse around the text
    #[serde(default = "default_tag_handling")]
    pub tag_handling: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            preserve_formatting: true,
            tag_handling: default_tag_handling(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_source_language() -> String {
    "EN".to_string()
}

fn default_pages() -> Vec<PathBuf> {
    [
        "index.html",
        "contact.html",
        "whoweare.html",
        "jointheproject.html",
        "newsletter_sub.html",
        "resources/index.html",
        "resources/data-policy.html",
        "resources/consent-form.html",
        "resources/biobanking-agreement.html",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

fn default_target_locales() -> Vec<TargetLocale> {
    TargetLocale::ALL.to_vec()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_tag_handling() -> String {
    "html".to_string()
}

impl Config {
    /// Load a configuration file, or fall back to defaults when it does not exist.
    ///
    /// Nothing is written back to disk.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)?;

        if self.pages.is_empty() {
            return Err(anyhow!("At least one page must be configured"));
        }

        if self.target_locales.is_empty() {
            return Err(anyhow!("At least one target locale must be configured"));
        }

        for page in &self.pages {
            if !is_contained_relative_path(page) {
                return Err(anyhow!(
                    "Page path must be relative to the project root without '..': {:?}",
                    page
                ));
            }
        }

        if self.translation.tag_handling.is_empty() {
            return Err(anyhow!("Tag handling must not be empty"));
        }

        Ok(())
    }

    // @returns: Source language in the uppercase form the provider expects
    pub fn source_language_code(&self) -> String {
        self.source_language.trim().to_uppercase()
    }
}

/// Whether a page path stays below the directory it is joined to
pub fn is_contained_relative_path(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            project_root: default_project_root(),
            source_language: default_source_language(),
            pages: default_pages(),
            target_locales: default_target_locales(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
