//! Shared helpers for tweet-sweep CLI tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub const ARCHIVE: &str = r#"window.YTD.tweet.part0 = [
  {
    "tweet" : {
      "id" : "1001",
      "created_at" : "Wed Jan 01 12:00:00 +0000 2020",
      "full_text" : "Happy 2020"
    }
  },
  {
    "tweet" : {
      "id" : "1002",
      "created_at" : "Tue Jun 15 08:30:00 +0000 2021",
      "full_text" : "Midsummer"
    }
  },
  {
    "tweet" : {
      "id" : "1003",
      "created_at" : "Wed Mar 01 09:15:00 +0000 2023",
      "full_text" : "Still here"
    }
  }
]"#;

const OVERRIDE_VARS: &[&str] = &[
    "TWEETSWEEP_CONSUMER_KEY",
    "TWEETSWEEP_CONSUMER_SECRET",
    "TWEETSWEEP_ACCESS_TOKEN",
    "TWEETSWEEP_ACCESS_TOKEN_SECRET",
    "TWEETSWEEP_API_BASE_URL",
    "RUST_LOG",
];

/// Helper to escape path for TOML on Windows
fn escape_path_for_toml(path: &str) -> String {
    path.replace('\\', "\\\\")
}

/// Isolated config and archive for one test
pub struct TestEnv {
    _temp_dir: TempDir,
    pub config_path: PathBuf,
    pub archive_path: PathBuf,
}

impl TestEnv {
    /// Environment with full credentials pointing at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_twitter_section(
            base_url,
            r#"
[twitter]
consumer_key = "test-consumer-key"
consumer_secret = "test-consumer-secret"
access_token = "test-access-token"
access_token_secret = "test-access-token-secret"
"#,
        )
    }

    /// Environment whose config has no credentials at all
    pub fn without_credentials() -> Self {
        Self::with_twitter_section("http://127.0.0.1:1", "")
    }

    fn with_twitter_section(base_url: &str, twitter: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let archive_path = temp_dir.path().join("tweet.js");

        let config_content = format!(
            r#"{}
[api]
base_url = "{}"
pacing_interval_ms = 50
timeout_secs = 5

[archive]
path = "{}"
"#,
            twitter,
            base_url,
            escape_path_for_toml(&archive_path.to_string_lossy())
        );

        fs::write(&config_path, config_content).unwrap();
        fs::write(&archive_path, ARCHIVE).unwrap();

        Self {
            _temp_dir: temp_dir,
            config_path,
            archive_path,
        }
    }

    pub fn write_archive(&self, contents: &str) {
        fs::write(&self.archive_path, contents).unwrap();
    }

    pub fn remove_archive(&self) {
        fs::remove_file(&self.archive_path).unwrap();
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tweet-sweep").unwrap();
        cmd.env("TWEETSWEEP_CONFIG", &self.config_path);
        for var in OVERRIDE_VARS {
            cmd.env_remove(var);
        }
        cmd
    }
}
