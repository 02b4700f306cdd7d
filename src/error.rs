//! Error taxonomy for map composition.
//!
//! Only conditions that make a build impossible surface here. Per-row data
//! problems are recovered inside the schema validator and never reach the
//! caller.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while loading or composing a map.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A required column is absent from the dataset header.
    #[error("{dataset} is missing required columns: {}", .missing.join(", "))]
    Schema {
        dataset: String,
        missing: Vec<String>,
    },

    /// No coordinates at all were available to center the map on.
    #[error("no coordinates available to compute the map center; supply a fallback center")]
    EmptyViewport,

    /// A configuration value is outside its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ComposeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Names of the missing columns, if this is a schema error.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::Schema { missing, .. } => missing,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;
