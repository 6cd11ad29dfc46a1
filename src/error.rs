//! Error types for configuration loading, CLI input and booking sources.
//!
//! None of these are business outcomes: malformed request fields are
//! defaulted and incomplete windows are reported as warnings. An `Error`
//! means the caller handed over something the core cannot work with.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config TOML: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid clock value for {field}: {value:?} (expected HH:MM)")]
    InvalidClock { field: &'static str, value: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("booking source unavailable: {0}")]
    Source(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
