use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use users::config::UsersConfig;

/// Main application configuration with strongly-typed sections.
/// Layered loading: defaults → YAML file → `APP__` environment variables
/// (e.g. `APP__SERVER__PORT=9000` maps to `server.port`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sankhya: SankhyaConfig,
    #[serde(default)]
    pub users: UsersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Gateway endpoint and the service-account credentials for its login call.
/// Credentials are static configuration, never user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SankhyaConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub appkey: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SankhyaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            appkey: String::new(),
            username: String::new(),
            password: String::new(),
            login_timeout_secs: default_login_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    sankhya::client::DEFAULT_BASE_URL.to_string()
}

fn default_login_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl SankhyaConfig {
    pub fn client_config(&self) -> Result<sankhya::Config> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid sankhya.base_url '{}'", self.base_url))?;
        let credentials = sankhya::Credentials {
            token: self.token.clone(),
            appkey: self.appkey.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let mut config = sankhya::Config::new(base_url, credentials);
        config.login_timeout = Duration::from_secs(self.login_timeout_secs);
        config.request_timeout = Duration::from_secs(self.request_timeout_secs);
        Ok(config)
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file →
    /// environment variables.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        use figment::providers::{Env, Format, Serialized, Yaml};
        use figment::Figment;

        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .context("failed to extract configuration")
    }

    /// Serialize the effective configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config to YAML")
    }
}
