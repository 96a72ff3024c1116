//! Credential resolution
//!
//! Two candidates are checked in order: a value baked in at build time,
//! then a runtime override the front end may replace at any point. The
//! first non-empty candidate wins.

use chiko_llm::ApiKey;
use std::sync::RwLock;
use tracing::debug;

/// Resolves the provider API key for each request
#[derive(Debug, Default)]
pub struct CredentialResolver {
    build_time: Option<ApiKey>,
    runtime: RwLock<Option<ApiKey>>,
}

impl CredentialResolver {
    /// Create a resolver with an explicit build-time value
    #[must_use]
    pub fn new(build_time: Option<&str>) -> Self {
        Self {
            build_time: build_time.and_then(ApiKey::parse),
            runtime: RwLock::new(None),
        }
    }

    /// Resolver seeded from `CHIKO_API_KEY` as captured at compile time
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("CHIKO_API_KEY"))
    }

    /// Set the runtime override
    #[must_use]
    pub fn with_override(self, value: Option<&str>) -> Self {
        self.set_override(value);
        self
    }

    /// Replace the runtime override. Blank values clear it.
    pub fn set_override(&self, value: Option<&str>) {
        let key = value.and_then(ApiKey::parse);
        debug!(present = key.is_some(), "Credential override updated");
        match self.runtime.write() {
            Ok(mut guard) => *guard = key,
            Err(poisoned) => *poisoned.into_inner() = key,
        }
    }

    /// First non-empty candidate, if any
    #[must_use]
    pub fn resolve(&self) -> Option<ApiKey> {
        if let Some(key) = &self.build_time {
            return Some(key.clone());
        }
        match self.runtime.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any candidate is present
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.resolve().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_configured() {
        let resolver = CredentialResolver::new(None);
        assert!(resolver.resolve().is_none());
        assert!(!resolver.is_available());
    }

    #[test]
    fn test_build_time_wins() {
        let resolver =
            CredentialResolver::new(Some("AIzaBuildTimeKey0001")).with_override(Some("AIzaRuntimeKey0002"));
        assert_eq!(resolver.resolve().unwrap().expose(), "AIzaBuildTimeKey0001");
    }

    #[test]
    fn test_blank_build_time_falls_through() {
        let resolver = CredentialResolver::new(Some("\"\"")).with_override(Some("AIzaRuntimeKey0002"));
        assert_eq!(resolver.resolve().unwrap().expose(), "AIzaRuntimeKey0002");
    }

    #[test]
    fn test_override_can_be_cleared() {
        let resolver = CredentialResolver::new(None).with_override(Some("AIzaRuntimeKey0002"));
        assert!(resolver.is_available());
        resolver.set_override(Some("   "));
        assert!(!resolver.is_available());
    }

    #[test]
    fn test_debug_never_shows_key() {
        let resolver = CredentialResolver::new(Some("AIzaSuperSecretValue9"));
        let debug = format!("{:?}", resolver);
        assert!(!debug.contains("SuperSecret"));
    }
}
