use dotenvy::dotenv;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "views-client.toml";
pub const ENV_PREFIX: &str = "VIEWS_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("server_url must not be empty")]
    MissingServerUrl,
    #[error("default_per_page must be at least 1")]
    InvalidPerPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://127.0.0.1:9000/api`.
    pub server_url: String,
    /// Access token sent as basic-auth user with the password `token`.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub default_per_page: u32,
    /// Value of the `X-Requested-By` header the API requires on writes.
    pub requested_by: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:9000/api".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            default_per_page: 10,
            requested_by: "views-client".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, then `views-client.toml`, then `VIEWS_*` variables
    /// (including those from `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        debug!(
            "Loaded client config: server_url={}, timeout={}s, per_page={}",
            config.server_url, config.request_timeout_secs, config.default_per_page
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::MissingServerUrl);
        }
        if self.default_per_page == 0 {
            return Err(ConfigError::InvalidPerPage);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = ClientConfig::load_from(DEFAULT_CONFIG_FILE).unwrap();
            assert_eq!(config, ClientConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                server_url = "https://logs.example.com/api"
                default_per_page = 25
                "#,
            )?;
            jail.set_env("VIEWS_DEFAULT_PER_PAGE", "50");
            jail.set_env("VIEWS_API_TOKEN", "secret");

            let config = ClientConfig::load_from(DEFAULT_CONFIG_FILE).unwrap();
            assert_eq!(config.server_url, "https://logs.example.com/api");
            assert_eq!(config.default_per_page, 50);
            assert_eq!(config.api_token.as_deref(), Some("secret"));
            assert_eq!(config.request_timeout(), Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn test_empty_server_url_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("VIEWS_SERVER_URL", "");
            let result = ClientConfig::load_from(DEFAULT_CONFIG_FILE);
            assert!(matches!(result, Err(ConfigError::MissingServerUrl)));
            Ok(())
        });
    }
}
