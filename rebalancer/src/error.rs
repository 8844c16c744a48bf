//! Error types for the rebalancer front end.

use std::path::PathBuf;

/// All errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{0}")]
    Ledger(#[from] nanofolio::Error),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("aborted: {0}")]
    Aborted(String),
}

impl Error {
    /// True for errors caused by bad user input (unknown row, bad amount).
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            Error::Ledger(
                nanofolio::Error::IndexOutOfRange { .. }
                    | nanofolio::Error::InvalidAmount(_)
                    | nanofolio::Error::InvalidCategory(_)
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
