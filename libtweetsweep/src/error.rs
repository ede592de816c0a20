//! Error types for tweet-sweep

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::Platform(PlatformError::Authentication(_)) => 2,
            SweepError::Platform(_) => 1,
            SweepError::Config(_) => 1,
            SweepError::Archive(_) => 1,
            SweepError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error(
        "Missing credentials: {0}. Set them in the [twitter] section of your config file \
         or through the TWEETSWEEP_* environment variables"
    )]
    MissingCredentials(String),
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error(
        "Archive file not found: {}. Copy data/tweet.js from your unzipped Twitter archive, \
         or point --archive at the archive folder",
        .0.display()
    )]
    NotFound(PathBuf),

    #[error("Failed to read archive file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Couldn't find the start of the tweet array. Something may be wrong with the archive file")]
    MissingArray,

    #[error("Couldn't read tweets. Something may be wrong with the archive file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tweet {id} has an unreadable timestamp '{value}': {source}")]
    Timestamp {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API request failed (HTTP {status}{}): {message}", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),
}

impl PlatformError {
    /// The service-level error code carried by an API error, if any
    pub fn api_code(&self) -> Option<u32> {
        match self {
            PlatformError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

fn code_suffix(code: &Option<u32>) -> String {
    match code {
        Some(code) => format!(", code {}", code),
        None => String::new(),
    }
}
