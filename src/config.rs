//! TOML configuration with environment overrides for provider credentials.
//!
//! ```toml
//! [db]
//! path = "./data/postchat.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [provider]
//! endpoint = "https://my-resource.openai.azure.com"
//! deployment = "gpt-4o-mini"
//! # api_key is usually supplied via AZURE_OPENAI_API_KEY
//! timeout_secs = 30
//! ```
//!
//! Provider credentials are optional at load time. They are validated on
//! each completion request so that a missing key is reported as a
//! configuration error before any network call, not as a startup failure.

use anyhow::{Context, Result};
use postchat_core::completion::ProviderSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderFileConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderFileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub deployment: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    /// Upper bound on a single provider call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderFileConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            deployment: None,
            api_version: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProviderFileConfig {
    /// Overlay environment variables on top of the file values.
    ///
    /// `lookup` abstracts `std::env::var` so tests can supply their own
    /// environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let pairs: [(&str, &mut Option<String>); 4] = [
            (ENV_API_KEY, &mut self.api_key),
            (ENV_ENDPOINT, &mut self.endpoint),
            (ENV_DEPLOYMENT, &mut self.deployment),
            (ENV_API_VERSION, &mut self.api_version),
        ];
        for (var, slot) in pairs {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                *slot = Some(value);
            }
        }
    }

    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            deployment: self.deployment.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

/// Parse and validate a configuration document. Environment overrides
/// are not applied.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.provider.timeout_secs == 0 {
        anyhow::bail!("provider.timeout_secs must be > 0");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

/// Load the configuration file and apply `AZURE_OPENAI_*` overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;
    config.provider.apply_env(|var| std::env::var(var).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const MINIMAL: &str = r#"
[db]
path = "./data/postchat.sqlite"
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(MINIMAL).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.provider.timeout_secs, 30);
        assert!(cfg.provider.api_key.is_none());
    }

    #[test]
    fn zero_timeout_rejected() {
        let content = format!("{}\n[provider]\ntimeout_secs = 0\n", MINIMAL);
        let err = parse_config(&content).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn missing_db_section_rejected() {
        assert!(parse_config("[server]\nbind = \"0.0.0.0:1\"\n").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let content = format!(
            "{}\n[provider]\nendpoint = \"https://file\"\ndeployment = \"file-dep\"\n",
            MINIMAL
        );
        let mut cfg = parse_config(&content).unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "env-key"),
            (ENV_DEPLOYMENT, "env-dep"),
            (ENV_API_VERSION, ""),
        ]
        .into_iter()
        .collect();
        cfg.provider
            .apply_env(|var| env.get(var).map(|v| v.to_string()));

        let settings = cfg.provider.settings();
        assert_eq!(settings.api_key.as_deref(), Some("env-key"));
        assert_eq!(settings.endpoint.as_deref(), Some("https://file"));
        assert_eq!(settings.deployment.as_deref(), Some("env-dep"));
        assert_eq!(settings.api_version, None);
    }
}
