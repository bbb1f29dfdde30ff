//! Primary error enum for configuration builds.

use std::sync::Arc;

use thiserror::Error;

use super::{ParsingError, ValidationError};
use crate::overrides::OverrideError;

/// Result alias used throughout the crate; errors are shared so callers can
/// keep and clone them cheaply.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;

/// Errors that can terminate a configuration build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration source could not be opened or read.
    #[error("failed to read configuration '{label}': {source}")]
    Io {
        /// Label of the source that failed.
        label: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document was malformed or could not be bound.
    #[error(transparent)]
    Parsing(Box<ParsingError>),

    /// The bound configuration violated its constraints.
    #[error(transparent)]
    Validation(Box<ValidationError>),

    /// An override path could not be applied to the document.
    #[error(transparent)]
    Override(#[from] OverrideError),
}

impl ConfigError {
    /// Construct an I/O error for the source `label`.
    #[must_use]
    pub fn io(label: impl Into<String>, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Io {
            label: label.into(),
            source,
        })
    }

    /// Returns the parsing report when this is a parsing failure.
    #[must_use]
    pub fn as_parsing(&self) -> Option<&ParsingError> {
        match self {
            Self::Parsing(report) => Some(&**report),
            _ => None,
        }
    }

    /// Returns the validation report when this is a validation failure.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(report) => Some(&**report),
            _ => None,
        }
    }

    /// Returns the override failure when an override could not be applied.
    #[must_use]
    pub const fn as_override(&self) -> Option<&OverrideError> {
        match self {
            Self::Override(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParsingError> for ConfigError {
    fn from(report: ParsingError) -> Self {
        Self::Parsing(Box::new(report))
    }
}

impl From<ValidationError> for ConfigError {
    fn from(report: ValidationError) -> Self {
        Self::Validation(Box::new(report))
    }
}
