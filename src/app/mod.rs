//! Application wiring
//!
//! Loads configuration and assembles the orchestrator the commands share.

mod config;
mod loader;

pub use config::AppConfig;
pub use loader::load_config;

use anyhow::{Context, Result};
use chiko_core::{CredentialResolver, FileStore, QuotaTracker, RequestOrchestrator};
use chiko_llm::GeminiTransport;
use std::sync::Arc;
use tracing::{debug, warn};

/// Quota tracker over the configured durable store
pub fn quota_tracker(config: &AppConfig) -> QuotaTracker {
    let store = match &config.quota.storage_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location(),
    };
    debug!(dir = %store.dir().display(), "Quota log location");
    QuotaTracker::new(Arc::new(store)).with_limits(config.quota.limits())
}

/// Build the orchestrator from configuration
pub fn build_orchestrator(config: &AppConfig) -> Result<RequestOrchestrator> {
    let transport = GeminiTransport::new(config.provider.gemini())
        .context("Failed to create Gemini transport")?;

    let credentials = CredentialResolver::from_build_env()
        .with_override(config.credential.api_key.as_deref());
    if !credentials.is_available() {
        warn!("No API key configured. Set CHIKO_API_KEY at build time or CHIKO_CREDENTIAL__API_KEY");
    }

    Ok(
        RequestOrchestrator::new(Arc::new(transport), config.orchestrator())
            .with_quota(Arc::new(quota_tracker(config)))
            .with_credentials(Arc::new(credentials)),
    )
}
