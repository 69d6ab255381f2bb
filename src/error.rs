use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = DashError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("{0}")]
    Message(String),

    #[error("invalid {field} filter value '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("failed to load dataset from {}: {source}", path.display())]
    Dataset {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashError {
    pub fn invalid_filter<S: ToString>(field: &'static str, value: S) -> Self {
        Self::InvalidFilter {
            field,
            value: value.to_string(),
        }
    }
}

/// Shortcut for [`DashError::Message`] with `format!` arguments.
#[macro_export]
macro_rules! dasherr {
    ($($arg:tt)*) => {
        $crate::error::DashError::Message(format!($($arg)*))
    };
}
