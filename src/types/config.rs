//! Configuration for stms-mcp.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables and command line flags. The resulting [`Config`] is
//! immutable for the lifetime of the process and handed to the server
//! explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::{StmsError, StmsResult};

/// Environment variable holding the staging base URL.
pub const STAGING_URL_ENV: &str = "STMS_STAGING_URL";

/// Environment variable holding the staging session cookie.
pub const STAGING_COOKIE_ENV: &str = "STMS_STAGING_COOKIE";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stms-mcp.toml";

/// Main configuration for stms-mcp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Upstream staging API settings.
    #[serde(default)]
    pub staging: StagingConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Client configuration for the staging API.
#[derive(Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Base URL every tool path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session cookie sent verbatim in the `Cookie` header. Empty means
    /// unauthenticated requests.
    #[serde(default)]
    pub cookie: String,

    /// Per-request timeout (in seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookie: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

// The cookie is a live session credential.
impl fmt::Debug for StagingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagingConfig")
            .field("base_url", &self.base_url)
            .field("cookie", &if self.cookie_configured() { "<redacted>" } else { "" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://stms-api.noonstg.partners".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl StagingConfig {
    /// Creates a staging configuration for the given base URL and cookie.
    pub fn new(base_url: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cookie: cookie.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Whether a non-empty session cookie is configured.
    pub fn cookie_configured(&self) -> bool {
        !self.cookie.is_empty()
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and checks the base URL.
    pub fn parsed_base_url(&self) -> StmsResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(StmsError::config(format!(
                "staging base URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> StmsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> StmsResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            staging: StagingConfig::default(),
        }
    }

    /// Loads the file at `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but fails to parse is an error, not a silent
    /// fallback.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> StmsResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Applies environment or command line overrides on top of file values.
    pub fn with_overrides(mut self, base_url: Option<String>, cookie: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.staging.base_url = url;
        }
        if let Some(cookie) = cookie {
            self.staging.cookie = cookie;
        }
        self
    }

    /// Checks values that would otherwise only fail on the first tool call.
    pub fn validate(&self) -> StmsResult<()> {
        self.staging.parsed_base_url()?;
        if self.staging.timeout_secs == 0 {
            return Err(StmsError::config("staging.timeout_secs must be greater than 0"));
        }
        match self.general.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(StmsError::config(format!(
                "general.log_format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.staging.base_url, "https://stms-api.noonstg.partners");
        assert_eq!(config.staging.cookie, "");
        assert_eq!(config.staging.timeout(), Duration::from_secs(30));
        assert!(!config.staging.cookie_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [staging]
            cookie = "session=abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.staging.cookie, "session=abc");
        assert_eq!(config.staging.base_url, "https://stms-api.noonstg.partners");
        assert_eq!(config.staging.timeout_secs, 30);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::default().with_overrides(
            Some("http://localhost:9000".to_string()),
            Some("session=xyz".to_string()),
        );
        assert_eq!(config.staging.base_url, "http://localhost:9000");
        assert!(config.staging.cookie_configured());

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched.staging.base_url, default_base_url());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config::default().with_overrides(Some("not a url".to_string()), None);
        assert!(config.validate().is_err());

        let config = Config::default().with_overrides(Some("ftp://host".to_string()), None);
        assert!(matches!(config.validate(), Err(StmsError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.general.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_cookie() {
        let staging = StagingConfig::new("https://example.test", "session=secret");
        let rendered = format!("{:?}", staging);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = Config::default().with_overrides(Some("http://127.0.0.1:8080".to_string()), None);
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.staging.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.staging.base_url, default_base_url());
    }

    #[test]
    fn test_load_or_default_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[staging\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load_or_default(&path),
            Err(StmsError::TomlParse(_))
        ));
    }
}
