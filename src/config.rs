//! Optional YAML configuration.
//!
//! Every key is optional and command-line flags take precedence.
//!
//! ```yaml
//! base_url: https://chat.example.com
//! endpoint: /api/v1/utils/news
//! token_store: /home/kim/.config/daily_news/storage.json
//! timeout_secs: 10
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Default transport timeout for the client the binary builds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin that relative endpoints are resolved against.
    pub base_url: Option<String>,
    /// Endpoint path or absolute URL of the news proxy.
    pub endpoint: Option<String>,
    /// Path to a JSON key-value file holding the bearer token.
    pub token_store: Option<String>,
    /// Transport timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Parse a configuration from YAML text. An empty document is the default.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Load a configuration file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for
/// [`Config`].
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<Config, Box<dyn Error>> {
    let text = tokio::fs::read_to_string(path).await?;
    let config = Config::from_yaml(&text)?;
    info!(?config, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_config() {
        let config = Config::from_yaml(
            "base_url: https://chat.example.com\n\
             endpoint: /api/v1/utils/news\n\
             token_store: /tmp/storage.json\n\
             timeout_secs: 3\n",
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://chat.example.com"));
        assert_eq!(config.endpoint.as_deref(), Some("/api/v1/utils/news"));
        assert_eq!(config.token_store.as_deref(), Some("/tmp/storage.json"));
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_yaml("endpiont: /typo\n").is_err());
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: http://news.internal/digest").unwrap();

        let config = load_config(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://news.internal/digest"));
        assert_eq!(config.base_url, None);
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(load_config(path.to_str().unwrap()).await.is_err());
    }
}
