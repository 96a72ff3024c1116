//! Failure classification
//!
//! Every failure leaving the orchestrator is mapped once, at the boundary,
//! into a small fixed taxonomy with a localized message the front end can
//! show as-is. Rules are applied in priority order:
//!
//! 1. no resolvable credential
//! 2. quota / key signals (structured HTTP status first, then message text)
//! 3. provider refusal (text-only answer to a media request)
//! 4. transport failure before any response
//! 5. anything else, carried verbatim

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Locale
// ============================================================================

/// Language of user-facing messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Casual Indonesian
    #[default]
    #[serde(rename = "id")]
    Indonesian,
    /// English
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Locale code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::English => "en",
        }
    }

    /// Parse a locale code (`id`, `en`), case-insensitive
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "indonesian" => Some(Self::Indonesian),
            "en" | "en-us" | "en-gb" | "english" => Some(Self::English),
            _ => None,
        }
    }

    fn missing_credential(&self) -> &'static str {
        match self {
            Self::Indonesian => {
                "API Key Hilang! Set CHIKO_CREDENTIAL__API_KEY di .env, \
                 atau api_key di bagian [credential] config/local.toml."
            }
            Self::English => {
                "API key missing! Set CHIKO_CREDENTIAL__API_KEY in .env, \
                 or api_key under [credential] in config/local.toml."
            }
        }
    }

    fn rejected_credential(&self) -> &'static str {
        match self {
            Self::Indonesian => {
                "API Key ditolak server Bro. Cek lagi konfigurasi API Key kamu, terus coba lagi."
            }
            Self::English => "The API key was rejected. Check your API key configuration and retry.",
        }
    }

    fn quota_exceeded(&self) -> &'static str {
        match self {
            Self::Indonesian => {
                "Kuota API habis atau API Key kamu dibatasi. Cek konfigurasi API Key, \
                 atau tunggu sebentar sebelum coba lagi."
            }
            Self::English => {
                "API quota exhausted or the key is restricted. Check your API key \
                 configuration, or wait a moment before retrying."
            }
        }
    }

    fn transport(&self) -> &'static str {
        match self {
            Self::Indonesian => "Waduh, sinyalnya agak lemot Bro. Coba ulangi lagi.",
            Self::English => "Connection hiccup. Please try again.",
        }
    }

    pub(crate) fn edit_without_image(&self) -> &'static str {
        match self {
            Self::Indonesian => "AI tidak memberikan gambar balik. Coba prompt yang beda.",
            Self::English => "The AI did not return an image. Try a different prompt.",
        }
    }

    fn unknown_fallback(&self) -> &'static str {
        match self {
            Self::Indonesian => "Gagal koneksi ke server AI.",
            Self::English => "Could not reach the AI server.",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

/// Closed set of failure kinds the front end reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No credential configured, or the provider rejected it
    MissingCredential,
    /// Provider-side quota or rate limit hit
    QuotaExceeded,
    /// Provider answered a media request with an explanation instead
    ProviderRefusal,
    /// Network, DNS or timeout failure before any response
    Transport,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    /// Whether the failure concerns credential configuration
    #[must_use]
    pub fn is_credential_related(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::QuotaExceeded)
    }
}

/// Raw failure, before classification
#[derive(Debug, Error)]
pub enum Failure {
    /// No credential could be resolved
    #[error("no credential configured")]
    MissingCredential,

    /// Transport or provider error
    #[error(transparent)]
    Llm(#[from] chiko_llm::Error),

    /// Provider returned only explanatory text for a media request
    #[error("provider declined: {0}")]
    Refusal(String),

    /// Unclassified failure with a raw message
    #[error("{0}")]
    Unknown(String),
}

/// A failure mapped into the fixed taxonomy.
///
/// Displays as its user-facing message; the raw failure is the `source()`.
#[derive(Debug, Error)]
#[error("{user_message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    user_message: String,
    #[source]
    cause: Failure,
}

impl ClassifiedError {
    /// Failure kind
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Localized message safe to show as-is
    #[must_use]
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Original failure
    #[must_use]
    pub fn cause(&self) -> &Failure {
        &self.cause
    }
}

// ============================================================================
// Classifier
// ============================================================================

const QUOTA_SIGNALS: &[&str] = &[
    "quota",
    "429",
    "resource_exhausted",
    "rate limit",
    "too many requests",
];

const KEY_SIGNALS: &[&str] = &[
    "403",
    "401",
    "key",
    "permission",
    "unauthorized",
    "unauthenticated",
];

/// Maps raw failures into [`ClassifiedError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier {
    locale: Locale,
}

impl ErrorClassifier {
    /// Create a classifier emitting messages in `locale`
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Message locale
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Classify `failure`. `credential_available` reports whether a
    /// credential was resolvable at call time.
    #[must_use]
    pub fn classify(&self, failure: Failure, credential_available: bool) -> ClassifiedError {
        let (kind, user_message) = self.decide(&failure, credential_available);
        ClassifiedError {
            kind,
            user_message,
            cause: failure,
        }
    }

    fn decide(&self, failure: &Failure, credential_available: bool) -> (ErrorKind, String) {
        if !credential_available || matches!(failure, Failure::MissingCredential) {
            return (
                ErrorKind::MissingCredential,
                self.locale.missing_credential().to_string(),
            );
        }

        if let Some(kind) = credential_signal(failure) {
            let message = match kind {
                ErrorKind::QuotaExceeded => self.locale.quota_exceeded(),
                _ => self.locale.rejected_credential(),
            };
            return (kind, message.to_string());
        }

        match failure {
            Failure::Refusal(text) => (ErrorKind::ProviderRefusal, text.clone()),
            Failure::Llm(e) if e.is_transport() => {
                (ErrorKind::Transport, self.locale.transport().to_string())
            }
            other => {
                let raw = other.to_string();
                let message = if raw.trim().is_empty() {
                    self.locale.unknown_fallback().to_string()
                } else {
                    raw
                };
                (ErrorKind::Unknown, message)
            }
        }
    }
}

/// Quota or key signal carried by a failure, if any
fn credential_signal(failure: &Failure) -> Option<ErrorKind> {
    let text = match failure {
        // A refusal is a successful answer, not an error report
        Failure::Refusal(_) | Failure::MissingCredential => return None,
        // Transport text carries URLs and durations, not provider verdicts
        Failure::Llm(e) if e.is_transport() => return None,
        Failure::Llm(e) => {
            let text = e.to_string().to_lowercase();
            match e.status() {
                Some(429) => return Some(ErrorKind::QuotaExceeded),
                Some(401 | 403) if mentions_any(&text, QUOTA_SIGNALS) => {
                    return Some(ErrorKind::QuotaExceeded)
                }
                Some(401 | 403) => return Some(ErrorKind::MissingCredential),
                _ => text,
            }
        }
        Failure::Unknown(message) => message.to_lowercase(),
    };

    if mentions_any(&text, QUOTA_SIGNALS) {
        Some(ErrorKind::QuotaExceeded)
    } else if mentions_any(&text, KEY_SIGNALS) {
        Some(ErrorKind::MissingCredential)
    } else {
        None
    }
}

fn mentions_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiko_llm::Error as LlmError;
    use std::error::Error as _;

    fn classifier() -> ErrorClassifier {
        ErrorClassifier::default()
    }

    #[test]
    fn test_missing_credential_wins_over_everything() {
        let err = classifier().classify(
            Failure::Llm(LlmError::Network("connection refused".to_string())),
            false,
        );
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert!(err.user_message().contains("API Key Hilang"));
    }

    #[test]
    fn test_403_and_network_is_credential_related() {
        let err = classifier().classify(
            Failure::Unknown("403 network error while calling provider".to_string()),
            true,
        );
        assert!(err.kind().is_credential_related());
        assert_ne!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_structured_rate_limit_is_quota() {
        let err = classifier().classify(
            Failure::Llm(LlmError::RateLimit("RESOURCE_EXHAUSTED".to_string())),
            true,
        );
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
        assert!(err.user_message().contains("konfigurasi API Key"));
    }

    #[test]
    fn test_structured_forbidden_is_key_problem() {
        let err = classifier().classify(
            Failure::Llm(LlmError::Api {
                status: 403,
                message: "PERMISSION_DENIED: Method doesn't allow unregistered callers"
                    .to_string(),
            }),
            true,
        );
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert!(err.user_message().contains("ditolak"));
    }

    #[test]
    fn test_forbidden_naming_quota_is_quota() {
        let err = classifier().classify(
            Failure::Llm(LlmError::Api {
                status: 403,
                message: "Quota exceeded for project".to_string(),
            }),
            true,
        );
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_unstructured_key_phrase() {
        let err = classifier().classify(
            Failure::Llm(LlmError::Api {
                status: 400,
                message: "INVALID_ARGUMENT: API key not valid. Please pass a valid API key."
                    .to_string(),
            }),
            true,
        );
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_refusal_is_verbatim() {
        let text = "I can't edit images of real people in that way.";
        let err = classifier().classify(Failure::Refusal(text.to_string()), true);
        assert_eq!(err.kind(), ErrorKind::ProviderRefusal);
        assert_eq!(err.user_message(), text);
        assert_eq!(err.to_string(), text);
    }

    #[test]
    fn test_refusal_mentioning_key_stays_refusal() {
        let text = "Sorry, I can't recreate the key art of that franchise.";
        let err = classifier().classify(Failure::Refusal(text.to_string()), true);
        assert_eq!(err.kind(), ErrorKind::ProviderRefusal);
    }

    #[test]
    fn test_transport_failures() {
        for failure in [
            LlmError::Network("dns error: no such host".to_string()),
            LlmError::Timeout(60_000),
        ] {
            let err = classifier().classify(Failure::Llm(failure), true);
            assert_eq!(err.kind(), ErrorKind::Transport);
            assert_eq!(err.user_message(), "Waduh, sinyalnya agak lemot Bro. Coba ulangi lagi.");
        }
    }

    #[test]
    fn test_port_numbers_in_network_errors_are_not_status_codes() {
        for url in [
            "http://127.0.0.1:4030/v1beta/models",
            "http://127.0.0.1:14290/v1beta/models",
            "http://proxy.local:4011/key-service",
        ] {
            let failure = LlmError::Network(format!("error sending request for url ({url})"));
            let err = classifier().classify(Failure::Llm(failure), true);
            assert_eq!(err.kind(), ErrorKind::Transport, "{url}");
        }
    }

    #[test]
    fn test_unknown_is_verbatim() {
        let err = classifier().classify(
            Failure::Unknown("No image data found in response".to_string()),
            true,
        );
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.user_message(), "No image data found in response");
    }

    #[test]
    fn test_unknown_blank_uses_fallback() {
        let err = classifier().classify(Failure::Unknown("  ".to_string()), true);
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.user_message(), "Gagal koneksi ke server AI.");
    }

    #[test]
    fn test_english_locale() {
        let err = ErrorClassifier::new(Locale::English).classify(Failure::MissingCredential, true);
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert!(err.user_message().starts_with("API key missing"));
        assert!(err.user_message().contains("CHIKO_CREDENTIAL__API_KEY"));
    }

    #[test]
    fn test_source_is_original_failure() {
        let err = classifier().classify(
            Failure::Llm(LlmError::Timeout(5_000)),
            true,
        );
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("timeout after 5000ms"));
        assert!(matches!(err.cause(), Failure::Llm(LlmError::Timeout(5_000))));
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("EN"), Some(Locale::English));
        assert_eq!(Locale::from_code("id"), Some(Locale::Indonesian));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::default().as_str(), "id");
    }
}
