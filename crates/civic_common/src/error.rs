//! Error types for Civic Desk.

use crate::citizen::CitizenId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CivicError>;

#[derive(Error, Debug)]
pub enum CivicError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Citizen records error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid FAQ table: {0}")]
    InvalidTable(String),

    #[error("Similarity cutoff must be within [0, 1], got {0}")]
    InvalidCutoff(f64),

    #[error("Match count must be greater than zero")]
    InvalidMatchCount,

    #[error("Duplicate citizen id {0}")]
    DuplicateCitizen(CitizenId),

    #[error(transparent)]
    Login(#[from] LoginError),
}

/// Reasons a login attempt is refused. The display strings are shown to the
/// citizen verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid input. Enter a number.")]
    NotANumber,

    #[error("Invalid ID. Try again.")]
    UnknownId(CitizenId),
}

impl CivicError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            CivicError::Login(_) => 2,
            _ => 1,
        }
    }
}
