//! Integration tests for Chiko
//!
//! These tests verify the integration between the crates without reaching
//! the real provider:
//! - chiko-llm: Gemini transport against an unreachable endpoint
//! - chiko-core: orchestrator, durable quota log, classification

use chiko_core::{
    CredentialResolver, ErrorKind, FileStore, Locale, OrchestratorConfig, Personality,
    QuotaLimits, QuotaTracker, RequestOrchestrator, Transcript, TurnOutcome,
};
use chiko_llm::{GeminiConfig, GeminiTransport, MessageRole};
use std::sync::Arc;
use std::time::Duration;

fn offline_orchestrator(
    dir: &std::path::Path,
    key: Option<&str>,
    locale: Locale,
) -> (RequestOrchestrator, Arc<QuotaTracker>) {
    // Nothing listens on the discard port
    let transport = GeminiTransport::new(
        GeminiConfig::new()
            .with_base_url("http://127.0.0.1:9/v1beta")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let quota = Arc::new(
        QuotaTracker::new(Arc::new(FileStore::new(dir))).with_limits(QuotaLimits {
            per_minute: 2,
            per_day: 10,
            low_threshold: 1,
        }),
    );

    let orchestrator = RequestOrchestrator::new(
        Arc::new(transport),
        OrchestratorConfig::default().with_locale(locale),
    )
    .with_quota(Arc::clone(&quota))
    .with_credentials(Arc::new(CredentialResolver::new(key)));

    (orchestrator, quota)
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, quota) =
        offline_orchestrator(dir.path(), Some("AIzaIntegrationKey0001"), Locale::English);

    let mut transcript = Transcript::with_greeting();
    let outcome = orchestrator
        .converse(&mut transcript, "hello?", Personality::Professional, |_| {})
        .await
        .unwrap();

    match outcome {
        TurnOutcome::Failed { error, partial, .. } => {
            assert_eq!(error.kind(), ErrorKind::Transport);
            assert!(partial.is_none());
        }
        TurnOutcome::Completed(m) => panic!("unexpected reply: {}", m.content),
    }

    let roles: Vec<MessageRole> = transcript.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::Model, MessageRole::User, MessageRole::Model]
    );

    // The attempt was charged and persisted
    let reopened = QuotaTracker::new(Arc::new(FileStore::new(dir.path())));
    assert_eq!(reopened.log().len(), 1);
    assert_eq!(quota.stats().used_per_minute, 1);
}

#[tokio::test]
async fn test_missing_key_never_leaves_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, quota) = offline_orchestrator(dir.path(), None, Locale::Indonesian);

    let err = orchestrator
        .send_chat_turn(&[], "halo", Personality::Friendly)
        .await
        .unwrap_err();
    assert_eq!(err.classified().unwrap().kind(), ErrorKind::MissingCredential);

    orchestrator
        .credentials()
        .set_override(Some("AIzaOverrideAfterStart"));
    let err = orchestrator
        .send_chat_turn(&[], "halo lagi", Personality::Friendly)
        .await
        .unwrap_err();
    assert_eq!(err.classified().unwrap().kind(), ErrorKind::Transport);

    let stats = quota.stats();
    assert_eq!(stats.used_per_minute, 2);
    assert_eq!(stats.remaining, 0);
    assert!(stats.is_low);
}
