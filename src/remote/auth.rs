//! Bearer token lookup.

use crate::storage::CacheBackend;
use secrecy::{ExposeSecret, SecretString};

/// Cache key under which the login flow leaves the bearer token.
pub const AUTH_TOKEN_CACHE_KEY: &str = "kavya_auth_token";

/// Resolves the bearer token.
///
/// A configured token (config file or `FIELDSTORE_AUTH_TOKEN`, already folded
/// into the configuration) wins; otherwise the token stored in the cache by
/// the login flow is used. Blank tokens count as absent. A token stored as a
/// JSON string literal is unquoted.
pub fn resolve_token(configured: Option<&SecretString>, cache: &dyn CacheBackend) -> Option<SecretString> {
    if let Some(token) = configured.filter(|t| !t.expose_secret().trim().is_empty()) {
        tracing::debug!(source = "config", "Using configured auth token");
        return Some(token.clone());
    }

    match cache.load(AUTH_TOKEN_CACHE_KEY) {
        Ok(Some(raw)) => {
            let token = unquote(raw.trim());
            if token.is_empty() {
                None
            } else {
                tracing::debug!(source = "cache", "Using cached auth token");
                Some(SecretString::from(token))
            }
        },
        Ok(None) => {
            tracing::debug!("No auth token available; requests will be unauthenticated");
            None
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cached auth token");
            None
        },
    }
}

fn unquote(raw: &str) -> String {
    if raw.starts_with('"') {
        if let Ok(serde_json::Value::String(s)) = serde_json::from_str(raw) {
            return s.trim().to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;

    #[test]
    fn test_configured_token_wins() {
        let cache = MemoryCache::with_entries([(AUTH_TOKEN_CACHE_KEY, "cached")]);
        let configured = SecretString::from("configured".to_string());
        let token = resolve_token(Some(&configured), &cache).unwrap();
        assert_eq!(token.expose_secret(), "configured");
    }

    #[test]
    fn test_falls_back_to_cache() {
        let cache = MemoryCache::with_entries([(AUTH_TOKEN_CACHE_KEY, "\"eyJhbGci\"")]);
        let blank = SecretString::from(" ".to_string());
        let token = resolve_token(Some(&blank), &cache).unwrap();
        assert_eq!(token.expose_secret(), "eyJhbGci");
    }

    #[test]
    fn test_no_token() {
        let cache = MemoryCache::new();
        assert!(resolve_token(None, &cache).is_none());

        let cache = MemoryCache::with_entries([(AUTH_TOKEN_CACHE_KEY, "   ")]);
        assert!(resolve_token(None, &cache).is_none());
    }
}
