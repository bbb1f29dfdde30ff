//! Dotted-path overrides applied to a parsed document before binding.
//!
//! An override is a `(path, value)` pair such as `servers[0].port = 7000`.
//! The [`OverrideSet`] holds the raw key/value store, selects the entries
//! carrying the configured prefix and hands each stripped path to
//! [`apply_override`], which walks or extends the document tree and writes the
//! value as a string scalar. Binding later coerces the string into the field's
//! declared type.

mod error;
mod path;
mod set;

pub use error::OverrideError;
pub use path::{PathSegment, apply_override};
pub use set::OverrideSet;

/// Separator between override path segments.
pub const PATH_SEPARATOR: char = '.';

/// Normalize an override prefix so it always ends with [`PATH_SEPARATOR`].
///
/// # Examples
///
/// ```
/// use config_factory::normalize_prefix;
///
/// assert_eq!(normalize_prefix("dw"), "dw.");
/// assert_eq!(normalize_prefix("dw."), "dw.");
/// ```
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with(PATH_SEPARATOR) {
        prefix.to_owned()
    } else {
        format!("{prefix}{PATH_SEPARATOR}")
    }
}
