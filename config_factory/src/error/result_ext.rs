//! Extension for mapping errors into [`ConfigResult`] concisely.
//!
//! Replaces the repetitive `.map_err(|e| Arc::new(ConfigError::from(e)))`
//! pattern at call sites.
//!
//! # Examples
//!
//! ```
//! use config_factory::{ConfigResult, ConfigResultExt, OverrideSet};
//! use serde_json::json;
//!
//! fn apply(doc: &mut serde_json::Value) -> ConfigResult<usize> {
//!     OverrideSet::new().with("dw.name", "x").apply(doc, "dw.").into_config()
//! }
//!
//! let mut doc = json!({});
//! assert_eq!(apply(&mut doc).ok(), Some(1));
//! ```

use std::sync::Arc;

use super::{ConfigError, ConfigResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigError>` into a [`ConfigResult<T>`].
pub trait ConfigResultExt<T> {
    /// Convert the error into a shared [`ConfigError`].
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
