//! Error types.
//!
//! Every failure is local to one section or one control. Nothing here is fatal
//! to the page as a whole.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the reveal coordinator and its collaborators.
#[derive(Debug, Error)]
pub enum FolioError {
    /// A root or content element was not present when a section mounted.
    #[error("element `{id}` is not on the page")]
    MissingElement { id: String },

    /// An input value is outside its allowed domain.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A mock action was triggered while a previous run was still in flight.
    #[error("`{action}` is already in flight")]
    DuplicateTrigger { action: String },

    /// A configuration or content file could not be read.
    #[error("failed to read {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration or content document could not be parsed.
    #[error("failed to parse configuration")]
    ConfigParse(#[from] toml::de::Error),
}

impl FolioError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FolioError>;
