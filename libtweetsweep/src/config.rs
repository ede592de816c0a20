//! Configuration management for tweet-sweep
//!
//! Configuration is read once at startup from a TOML file and then
//! overlaid with `TWEETSWEEP_*` environment variables. The resulting
//! [`Config`] is passed explicitly to whatever needs it.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::archive::DEFAULT_ARCHIVE_FILE;
use crate::error::{ConfigError, Result};

/// "No status found with that ID"
pub const ERROR_CODE_NO_STATUS_FOUND: u32 = 144;
/// "Sorry, you are not authorized to see this status"
pub const ERROR_CODE_NOT_AUTHORIZED_FOR_STATUS: u32 = 179;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";

pub const ENV_CONFIG_PATH: &str = "TWEETSWEEP_CONFIG";
pub const ENV_CONSUMER_KEY: &str = "TWEETSWEEP_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWEETSWEEP_CONSUMER_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWEETSWEEP_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWEETSWEEP_ACCESS_TOKEN_SECRET";
pub const ENV_API_BASE_URL: &str = "TWEETSWEEP_API_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub twitter: TwitterConfig,
    pub api: ApiConfig,
    pub archive: ArchiveConfig,
}

/// Raw credential values as they appear in the config file
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(value: &str) -> &'static str {
            if value.trim().is_empty() {
                "<empty>"
            } else {
                "<set>"
            }
        }

        f.debug_struct("TwitterConfig")
            .field("consumer_key", &mask(&self.consumer_key))
            .field("consumer_secret", &mask(&self.consumer_secret))
            .field("access_token", &mask(&self.access_token))
            .field("access_token_secret", &mask(&self.access_token_secret))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Error codes that skip the tweet instead of aborting the run
    pub tolerated_error_codes: Vec<u32>,
    pub pacing_interval_ms: u64,
    pub timeout_secs: u64,
    /// Check the credentials once before the first deletion
    pub verify_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            tolerated_error_codes: vec![
                ERROR_CODE_NO_STATUS_FOUND,
                ERROR_CODE_NOT_AUTHORIZED_FOR_STATUS,
            ],
            pacing_interval_ms: 1000,
            timeout_secs: 30,
            verify_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub path: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_ARCHIVE_FILE.to_string(),
        }
    }
}

/// Validated API credentials
///
/// Values are kept in [`SecretString`] so they never show up in `Debug`
/// output or logs.
#[derive(Debug)]
pub struct Credentials {
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
    pub access_token: SecretString,
    pub access_token_secret: SecretString,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path (or `TWEETSWEEP_CONFIG`) must exist. The default
    /// location is optional; if nothing is there, defaults are used.
    /// Environment overrides are applied last in every case.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let (path, required) = resolve_config_path(explicit_path)?;

        let mut config = if path.is_file() || required {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::load_from_path(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Overlay values found through `lookup`
    ///
    /// Empty values are ignored, so an unset-but-exported variable does not
    /// wipe out a value from the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(ENV_CONSUMER_KEY) {
            self.twitter.consumer_key = value;
        }
        if let Some(value) = get(ENV_CONSUMER_SECRET) {
            self.twitter.consumer_secret = value;
        }
        if let Some(value) = get(ENV_ACCESS_TOKEN) {
            self.twitter.access_token = value;
        }
        if let Some(value) = get(ENV_ACCESS_TOKEN_SECRET) {
            self.twitter.access_token_secret = value;
        }
        if let Some(value) = get(ENV_API_BASE_URL) {
            self.api.base_url = value;
        }
    }

    /// Validate and extract the four API credentials
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every empty value.
    pub fn credentials(&self) -> Result<Credentials> {
        let fields = [
            ("consumer_key", &self.twitter.consumer_key),
            ("consumer_secret", &self.twitter.consumer_secret),
            ("access_token", &self.twitter.access_token),
            ("access_token_secret", &self.twitter.access_token_secret),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing.join(", ")).into());
        }

        let secret = |value: &String| SecretString::from(value.trim().to_string());

        Ok(Credentials {
            consumer_key: secret(&self.twitter.consumer_key),
            consumer_secret: secret(&self.twitter.consumer_secret),
            access_token: secret(&self.twitter.access_token),
            access_token_secret: secret(&self.twitter.access_token_secret),
        })
    }
}

/// Resolve the configuration file path
///
/// Returns the path and whether it was named explicitly (and so must
/// exist). Lookup order: explicit path, `TWEETSWEEP_CONFIG`, then
/// `<config dir>/tweet-sweep/config.toml`.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<(PathBuf, bool)> {
    if let Some(path) = explicit_path {
        return Ok((expand(&path.to_string_lossy()), true));
    }

    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        if !path.trim().is_empty() {
            return Ok((expand(&path), true));
        }
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok((config_dir.join("tweet-sweep").join("config.toml"), false))
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
[twitter]
consumer_key = "ck"
consumer_secret = "cs"
access_token = "at"
access_token_secret = "ats"

[api]
base_url = "http://127.0.0.1:9999"
tolerated_error_codes = [144]
pacing_interval_ms = 250
timeout_secs = 5
verify_credentials = false

[archive]
path = "~/export/data/tweet.js"
"#;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.twitter.com");
        assert_eq!(config.api.tolerated_error_codes, vec![144, 179]);
        assert_eq!(config.api.pacing_interval_ms, 1000);
        assert!(config.api.verify_credentials);
        assert_eq!(config.archive.path, "tweet.js");
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.twitter.consumer_key, "ck");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.api.tolerated_error_codes, vec![144]);
        assert_eq!(config.api.pacing_interval_ms, 250);
        assert!(!config.api.verify_credentials);
        assert_eq!(config.archive.path, "~/export/data/tweet.js");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
[twitter]
consumer_key = "ck"
"#,
        )
        .unwrap();

        assert_eq!(config.twitter.consumer_key, "ck");
        assert_eq!(config.twitter.access_token, "");
        assert_eq!(config.api.tolerated_error_codes, vec![144, 179]);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("[twitter\nconsumer_key = ");
        assert!(matches!(
            result,
            Err(SweepError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::from_toml_str(FULL_CONFIG).unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_CONSUMER_KEY, "env-ck"),
            (ENV_ACCESS_TOKEN_SECRET, "env-ats"),
            (ENV_API_BASE_URL, "http://localhost:1234"),
            (ENV_CONSUMER_SECRET, "  "),
        ]
        .into_iter()
        .collect();

        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.twitter.consumer_key, "env-ck");
        assert_eq!(config.twitter.consumer_secret, "cs");
        assert_eq!(config.twitter.access_token, "at");
        assert_eq!(config.twitter.access_token_secret, "env-ats");
        assert_eq!(config.api.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_credentials_complete() {
        let config = Config::from_toml_str(FULL_CONFIG).unwrap();
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.consumer_key.expose_secret(), "ck");
        assert_eq!(credentials.access_token_secret.expose_secret(), "ats");
    }

    #[test]
    fn test_credentials_missing_are_all_reported() {
        let mut config = Config::default();
        config.twitter.consumer_key = "ck".to_string();
        config.twitter.access_token = "at".to_string();

        match config.credentials() {
            Err(SweepError::Config(ConfigError::MissingCredentials(names))) => {
                assert_eq!(names, "consumer_secret, access_token_secret");
            }
            other => panic!("Expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_whitespace_counts_as_missing() {
        let mut config = Config::from_toml_str(FULL_CONFIG).unwrap();
        config.twitter.access_token_secret = "   ".to_string();
        assert!(config.credentials().is_err());
    }

    #[test]
    fn test_debug_output_hides_credentials() {
        let config = Config::from_toml_str(FULL_CONFIG).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("\"ck\""));
        assert!(debug.contains("<set>"));

        let mut config = config;
        config.twitter.access_token_secret = "hunter2-token-secret".to_string();
        let credentials = config.credentials().unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let result = Config::load(Some(&path));
        assert!(matches!(
            result,
            Err(SweepError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, FULL_CONFIG).unwrap();

        std::env::set_var(ENV_CONFIG_PATH, &path);
        std::env::remove_var(ENV_CONSUMER_KEY);
        std::env::remove_var(ENV_API_BASE_URL);
        let config = Config::load(None);
        std::env::remove_var(ENV_CONFIG_PATH);

        let config = config.unwrap();
        assert_eq!(config.twitter.consumer_key, "ck");
        assert_eq!(config.api.pacing_interval_ms, 250);
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("explicit.toml");
        fs::write(&explicit, "[archive]\npath = \"explicit.js\"\n").unwrap();

        std::env::set_var(ENV_CONFIG_PATH, temp_dir.path().join("other.toml"));
        let resolved = resolve_config_path(Some(&explicit));
        std::env::remove_var(ENV_CONFIG_PATH);

        let (path, required) = resolved.unwrap();
        assert_eq!(path, explicit);
        assert!(required);
    }
}
