//! Shared error types for the architecture recovery pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Clustering was asked to run over a coupling graph that names no class
    #[error("Empty graph: the coupling graph contains no classes to cluster")]
    EmptyGraph,

    /// Module extraction received a threshold that is not a finite number
    #[error("Invalid threshold: {value} is not a finite number")]
    InvalidThreshold { value: f64 },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an input error for a file that could not be read
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
