//! Registrar configuration.
//!
//! Secrets come from the environment only; everything else may come from a
//! TOML file and falls back to defaults.

use anyhow::Result;
use bingo_core::invite::{DEFAULT_AUTHORIZE_URL, DEFAULT_PERMISSIONS, DEFAULT_SCOPES};
use bingo_core::sync::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use bingo_core::{Credentials, RegistrarError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const APP_ID_VAR: &str = "DISCORD_APP_ID";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_invite_permissions")]
    pub invite_permissions: u64,
    #[serde(default = "default_invite_scopes")]
    pub invite_scopes: Vec<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_authorize_url() -> String {
    DEFAULT_AUTHORIZE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_invite_permissions() -> u64 {
    DEFAULT_PERMISSIONS
}

fn default_invite_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            authorize_url: default_authorize_url(),
            timeout_secs: default_timeout_secs(),
            invite_permissions: default_invite_permissions(),
            invite_scopes: default_invite_scopes(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from config/default.toml if present, otherwise defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        Ok(Config::default())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Read credentials through `lookup`. Blank values count as missing.
pub fn credentials_from<F>(lookup: F) -> bingo_core::Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let token = read(TOKEN_VAR);
    let application_id = read(APP_ID_VAR);

    match (token, application_id) {
        (Some(token), Some(application_id)) => Ok(Credentials::new(token, application_id)),
        (token, application_id) => {
            let missing: Vec<&str> = [
                token.is_none().then_some(TOKEN_VAR),
                application_id.is_none().then_some(APP_ID_VAR),
            ]
            .into_iter()
            .flatten()
            .collect();
            Err(RegistrarError::Configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_present() {
        let creds = credentials_from(env(&[(TOKEN_VAR, "tok"), (APP_ID_VAR, " 1234 ")])).unwrap();
        assert_eq!(creds.token, "tok");
        assert_eq!(creds.application_id, "1234");
    }

    #[test]
    fn test_missing_both_named() {
        let err = credentials_from(env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variables: DISCORD_BOT_TOKEN, DISCORD_APP_ID"
        );
    }

    #[test]
    fn test_blank_token_is_missing() {
        let err = credentials_from(env(&[(TOKEN_VAR, "  "), (APP_ID_VAR, "1")])).unwrap_err();
        match err {
            RegistrarError::Configuration(msg) => {
                assert!(msg.contains(TOKEN_VAR));
                assert!(!msg.contains(APP_ID_VAR));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://discord.com/api/v10");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.invite_permissions, 2147485696);
        assert_eq!(config.invite_scopes, vec!["bot", "applications.commands"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_base = \"http://127.0.0.1:3000/api\"").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:3000/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.authorize_url, DEFAULT_AUTHORIZE_URL);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
