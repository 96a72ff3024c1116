//! Orchestrator core structure
//!
//! Contains the `RequestOrchestrator` struct, its builder methods and the
//! steps shared by every operation.

use super::config::OrchestratorConfig;
use super::slot::{Slot, SlotGuard, SlotTable};
use crate::classify::{ClassifiedError, ErrorClassifier, Failure};
use crate::credential::CredentialResolver;
use crate::error::{OrchestratorError, Result};
use crate::quota::{QuotaStats, QuotaTracker};
use chiko_llm::{ApiKey, GenerativeTransport};
use std::sync::Arc;
use tracing::{debug, warn};

/// Façade for chat, image generation and image editing
pub struct RequestOrchestrator {
    pub(crate) transport: Arc<dyn GenerativeTransport>,
    pub(crate) quota: Arc<QuotaTracker>,
    pub(crate) credentials: Arc<CredentialResolver>,
    pub(crate) classifier: ErrorClassifier,
    pub(crate) config: OrchestratorConfig,
    pub(crate) slots: SlotTable,
}

impl std::fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("transport", &self.transport.name())
            .field("config", &self.config)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl RequestOrchestrator {
    /// Create an orchestrator with an in-memory quota log and the
    /// build-time credential
    #[must_use]
    pub fn new(transport: Arc<dyn GenerativeTransport>, config: OrchestratorConfig) -> Self {
        let classifier = ErrorClassifier::new(config.locale);
        Self {
            transport,
            quota: Arc::new(QuotaTracker::in_memory()),
            credentials: Arc::new(CredentialResolver::from_build_env()),
            classifier,
            config,
            slots: SlotTable::default(),
        }
    }

    /// Set the quota tracker
    #[must_use]
    pub fn with_quota(mut self, quota: Arc<QuotaTracker>) -> Self {
        self.quota = quota;
        self
    }

    /// Set the credential resolver
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<CredentialResolver>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Credential resolver (runtime override can be replaced through it)
    #[must_use]
    pub fn credentials(&self) -> &Arc<CredentialResolver> {
        &self.credentials
    }

    /// Quota tracker
    #[must_use]
    pub fn quota(&self) -> &Arc<QuotaTracker> {
        &self.quota
    }

    /// Current quota usage
    #[must_use]
    pub fn quota_stats(&self) -> QuotaStats {
        self.quota.stats()
    }

    /// Whether a request currently holds `slot`
    #[must_use]
    pub fn is_busy(&self, slot: Slot) -> bool {
        self.slots.is_busy(slot)
    }

    pub(crate) fn acquire(&self, slot: Slot) -> Result<SlotGuard> {
        self.slots.try_acquire(slot).ok_or_else(|| {
            warn!(slot = %slot, "Rejected request: slot already in flight");
            OrchestratorError::SlotBusy(slot)
        })
    }

    /// Charge quota, then resolve the credential. Quota is charged on
    /// attempt, including attempts that fail here.
    pub(crate) async fn prepare(&self) -> std::result::Result<ApiKey, ClassifiedError> {
        self.charge_quota().await;

        match self.credentials.resolve() {
            Some(key) => Ok(key),
            None => {
                warn!("No API key configured; request not sent");
                Err(self.classifier.classify(Failure::MissingCredential, false))
            }
        }
    }

    /// Record the attempt off the async worker; the store may do file IO
    async fn charge_quota(&self) {
        let quota = Arc::clone(&self.quota);
        if let Err(e) = tokio::task::spawn_blocking(move || quota.record()).await {
            warn!(error = %e, "Quota tracking error: bookkeeping task failed");
        }
    }

    pub(crate) fn classify(&self, failure: impl Into<Failure>) -> ClassifiedError {
        let failure = failure.into();
        let classified = self.classifier.classify(failure, true);
        debug!(kind = ?classified.kind(), "Classified request failure");
        classified
    }
}
