use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("no input on stdin")]
    EmptyInput,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML input: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to deserialize input: {0}")]
    InvalidInput(#[source] serde_json::Error),
    #[error("{key} must be a non-negative integer, got {value}")]
    InvalidReservedKey { key: &'static str, value: String },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to configure logging: {0}")]
    Logging(String),
}
