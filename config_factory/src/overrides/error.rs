//! Failure kinds raised while addressing an override path.

use thiserror::Error;

/// An override could not be applied to the document tree.
///
/// These indicate a deployment misconfiguration in the override itself rather
/// than a problem with the configuration document, so the factory surfaces
/// them directly instead of wrapping them in a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OverrideError {
    /// The path walks into a scalar, or contains an empty segment.
    #[error("Unable to override {name}; it's not a valid path.")]
    InvalidPath {
        /// Override path with the prefix stripped.
        name: String,
    },

    /// An intermediate segment resolved to an array without an index.
    #[error("Unable to override {name}; target is an array but no index specified")]
    AmbiguousArrayTarget {
        /// Override path with the prefix stripped.
        name: String,
    },

    /// An indexed segment named a key that does not exist.
    #[error("Unable to override {name}; node with index not found.")]
    IndexNotFound {
        /// Override path with the prefix stripped.
        name: String,
    },

    /// An indexed segment named a node that is not an array.
    #[error("Unable to override {name}; node with index is not an array.")]
    NotAnArray {
        /// Override path with the prefix stripped.
        name: String,
    },

    /// An indexed segment addressed past the end of its array.
    #[error(
        "Unable to override {name}; index {index} is greater than size of array ({len})."
    )]
    IndexOutOfBounds {
        /// Override path with the prefix stripped.
        name: String,
        /// Requested element index.
        index: usize,
        /// Length of the addressed array.
        len: usize,
    },
}

impl OverrideError {
    /// Returns the override path that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidPath { name }
            | Self::AmbiguousArrayTarget { name }
            | Self::IndexNotFound { name }
            | Self::NotAnArray { name }
            | Self::IndexOutOfBounds { name, .. } => name,
        }
    }

    pub(super) fn invalid_path(name: &str) -> Self {
        Self::InvalidPath {
            name: name.to_owned(),
        }
    }

    pub(super) fn ambiguous_array_target(name: &str) -> Self {
        Self::AmbiguousArrayTarget {
            name: name.to_owned(),
        }
    }

    pub(super) fn index_not_found(name: &str) -> Self {
        Self::IndexNotFound {
            name: name.to_owned(),
        }
    }

    pub(super) fn not_an_array(name: &str) -> Self {
        Self::NotAnArray {
            name: name.to_owned(),
        }
    }

    pub(super) fn index_out_of_bounds(name: &str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            name: name.to_owned(),
            index,
            len,
        }
    }
}
