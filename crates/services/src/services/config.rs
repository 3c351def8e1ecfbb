//! Connection settings for the hosted database service.

use std::{sync::Arc, time::Duration};

use db::{
    DBService,
    remote::{PostgrestClient, RemoteError},
};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const TIMEOUT_VAR: &str = "SUPABASE_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Supabase environment variables: {0} is not set")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug)]
pub struct Config {
    pub url: Url,
    pub anon_key: SecretString,
    pub timeout: Duration,
}

impl Config {
    /// Load from the process environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&[])
    }

    /// Like [`Config::from_env`], with explicit values taking precedence.
    pub fn from_env_with(overrides: &[(&str, String)]) -> Result<Self, ConfigError> {
        match env_file(dotenvy::dotenv()) {
            Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring unreadable .env: {}", e),
        }
        Self::from_lookup(|var| {
            overrides
                .iter()
                .find(|(name, _)| *name == var)
                .map(|(_, value)| value.clone())
                .or_else(|| std::env::var(var).ok())
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let raw_url = present(URL_VAR).ok_or(ConfigError::Missing(URL_VAR))?;
        let url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::Invalid {
            var: URL_VAR,
            reason: e.to_string(),
        })?;

        let anon_key = present(KEY_VAR).ok_or(ConfigError::Missing(KEY_VAR))?;

        let timeout = match present(TIMEOUT_VAR) {
            Some(secs) => {
                let secs = secs.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    reason: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => PostgrestClient::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            url,
            anon_key: SecretString::from(anon_key.trim().to_string()),
            timeout,
        })
    }

    pub fn connect(self) -> Result<DBService, RemoteError> {
        let client = PostgrestClient::new(self.url, self.anon_key, Some(self.timeout))?;
        Ok(DBService::new(Arc::new(client)))
    }
}

/// A missing `.env` is not an error; anything else about it is.
fn env_file<T>(loaded: dotenvy::Result<T>) -> Result<Option<T>, dotenvy::Error> {
    match loaded {
        Ok(found) => Ok(Some(found)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_loads_required_values() {
        let config = Config::from_lookup(lookup(&[
            (URL_VAR, "https://example.supabase.co"),
            (KEY_VAR, " anon-key "),
        ]))
        .unwrap();
        assert_eq!(config.url.host_str(), Some("example.supabase.co"));
        assert_eq!(config.anon_key.expose_secret(), "anon-key");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let err = Config::from_lookup(lookup(&[(URL_VAR, "https://example.supabase.co")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(KEY_VAR)));
        assert!(err.to_string().starts_with("Missing Supabase environment variables"));
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[(URL_VAR, "  "), (KEY_VAR, "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(URL_VAR)));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup(&[
            (URL_VAR, "https://example.supabase.co"),
            (KEY_VAR, "k"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = env_file(dotenvy::from_path(dir.path().join(".env")));
        assert!(matches!(loaded, Ok(None)));
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SHIFTDESK_TEST_BROKEN value without equals").unwrap();
        let loaded = env_file(dotenvy::from_path(file.path()));
        assert!(loaded.is_err());
        assert!(std::env::var("SHIFTDESK_TEST_BROKEN").is_err());
    }
}
