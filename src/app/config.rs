//! Application configuration types

use chiko_core::{Locale, OrchestratorConfig, QuotaLimits};
use chiko_llm::gemini::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use chiko_llm::util::mask_api_key;
use chiko_llm::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub credential: CredentialConfig,
}

impl AppConfig {
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig::new()
            .with_chat_model(&self.provider.chat_model)
            .with_image_model(&self.provider.image_model)
            .with_locale(self.locale)
    }
}

/// Provider endpoint and models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Client-side quota limits and storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    #[serde(default = "default_per_minute")]
    pub per_minute_limit: u32,
    #[serde(default = "default_per_day")]
    pub per_day_limit: u32,
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_per_minute() -> u32 {
    QuotaLimits::default().per_minute
}

fn default_per_day() -> u32 {
    QuotaLimits::default().per_day
}

fn default_low_threshold() -> u32 {
    QuotaLimits::default().low_threshold
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            per_minute_limit: default_per_minute(),
            per_day_limit: default_per_day(),
            low_threshold: default_low_threshold(),
            storage_dir: None,
        }
    }
}

impl QuotaConfig {
    pub fn limits(&self) -> QuotaLimits {
        QuotaLimits {
            per_minute: self.per_minute_limit,
            per_day: self.per_day_limit,
            low_threshold: self.low_threshold,
        }
    }
}

/// Runtime credential override
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

// SECURITY: never print the full key
impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .finish()
    }
}
