use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// --- Use cases ---

/// Task category guiding the tone and specialization of a prompt review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UseCase {
    General,
    CreativeWriting,
    CodeGeneration,
    DataAnalysis,
    BusinessWriting,
}

impl UseCase {
    pub const ALL: [UseCase; 5] = [
        UseCase::General,
        UseCase::CreativeWriting,
        UseCase::CodeGeneration,
        UseCase::DataAnalysis,
        UseCase::BusinessWriting,
    ];

    /// Display label, e.g. "Creative Writing".
    pub fn label(&self) -> &'static str {
        match self {
            UseCase::General => "General",
            UseCase::CreativeWriting => "Creative Writing",
            UseCase::CodeGeneration => "Code Generation",
            UseCase::DataAnalysis => "Data Analysis",
            UseCase::BusinessWriting => "Business Writing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UseCase::General => "Basic prompt improvement",
            UseCase::CreativeWriting => "Stories, poems, creative content",
            UseCase::CodeGeneration => "Programming assistance",
            UseCase::DataAnalysis => "Research and analysis tasks",
            UseCase::BusinessWriting => "Emails, reports, proposals",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            UseCase::General => &[],
            UseCase::CreativeWriting => {
                &["Add genre/style", "Specify tone", "Include character details"]
            }
            UseCase::CodeGeneration => {
                &["Specify language", "Include context", "Add constraints"]
            }
            UseCase::DataAnalysis => {
                &["Define scope", "Specify format", "Include data context"]
            }
            UseCase::BusinessWriting => {
                &["Specify audience", "Include purpose", "Set professional tone"]
            }
        }
    }

    /// Parse a user-supplied key. Accepts the display label, hyphenated and
    /// underscored forms, case-insensitively ("Creative Writing",
    /// "creative-writing", "creative_writing").
    pub fn from_key(key: &str) -> Option<UseCase> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "general" => Some(UseCase::General),
            "creativewriting" => Some(UseCase::CreativeWriting),
            "codegeneration" => Some(UseCase::CodeGeneration),
            "dataanalysis" => Some(UseCase::DataAnalysis),
            "businesswriting" => Some(UseCase::BusinessWriting),
            _ => None,
        }
    }
}

impl Default for UseCase {
    fn default() -> Self {
        UseCase::General
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// --- AI Settings ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            provider: "anthropic".to_string(),
            api_key: String::new(),
            model: "claude-3-haiku-20240307".to_string(),
        }
    }
}

/// Resolve the global config directory (~/.critiq/).
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".critiq")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Conventional API-key environment variable for a provider, if it has one.
pub fn api_key_env(provider: &str) -> Option<&'static str> {
    match provider {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "google" => Some("GOOGLE_API_KEY"),
        "groq" => Some("GROQ_API_KEY"),
        "mistral" => Some("MISTRAL_API_KEY"),
        "deepseek" => Some("DEEPSEEK_API_KEY"),
        _ => None,
    }
}

/// Read settings from ~/.critiq/settings.json, falling back to defaults.
/// When the file carries no API key, the provider's conventional environment
/// variable fills it in.
pub fn read_settings() -> AiSettings {
    let mut settings = stored_settings();
    apply_env_fallback(&mut settings, |var| std::env::var(var).ok());
    settings
}

/// Read settings exactly as stored on disk, without the environment fallback.
/// This is what the settings-update path starts from, so an env-supplied key
/// is never accidentally persisted into the file.
pub fn stored_settings() -> AiSettings {
    read_settings_at(&settings_path()).unwrap_or_default()
}

fn read_settings_at(path: &Path) -> Option<AiSettings> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Fill in the API key from the provider's conventional environment variable
/// when the stored settings carry none. A key from the file always wins.
fn apply_env_fallback(settings: &mut AiSettings, lookup: impl Fn(&str) -> Option<String>) {
    if !settings.api_key.is_empty() {
        return;
    }
    if let Some(var) = api_key_env(&settings.provider) {
        if let Some(key) = lookup(var) {
            settings.api_key = key;
        }
    }
}

pub fn write_settings(settings: &AiSettings) -> Result<(), String> {
    write_settings_at(&settings_path(), settings)
}

fn write_settings_at(path: &Path, settings: &AiSettings) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| e.to_string())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
