//! Provider credential wrapper

use crate::util::mask_api_key;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

/// A resolved, non-empty provider API key.
///
/// Cloning is cheap and never copies the secret itself.
#[derive(Clone)]
pub struct ApiKey(Arc<SecretString>);

impl ApiKey {
    /// Wrap a key, rejecting blank values.
    ///
    /// A literal `""` (two quote characters, as left behind by some
    /// `.env` writers) counts as blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "\"\"" || trimmed == "''" {
            return None;
        }
        Some(Self(Arc::new(SecretString::from(trimmed.to_string()))))
    }

    /// Borrow the raw key for a request header
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

// SECURITY: never print the full key
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", mask_api_key(self.expose()))
    }
}
