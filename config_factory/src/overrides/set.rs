//! Injected key/value store that supplies overrides.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{OverrideError, apply_override};

/// Key/value pairs from which prefixed overrides are drawn.
///
/// Entries are kept in lexicographic key order, which is the order overrides
/// are applied in. Setting a key twice keeps only the last value.
///
/// # Examples
///
/// ```
/// use config_factory::OverrideSet;
/// use serde_json::json;
///
/// let overrides = OverrideSet::new()
///     .with("dw.name", "Hale Coda")
///     .with("other.name", "ignored");
/// let mut doc = json!({"name": "Coda Hale"});
/// let applied = overrides.apply(&mut doc, "dw.")?;
/// assert_eq!(applied, 1);
/// assert_eq!(doc["name"], "Hale Coda");
/// # Ok::<_, config_factory::OverrideError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    entries: BTreeMap<String, String>,
}

impl OverrideSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Snapshots the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`OverrideSet::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries whose key starts with `prefix`, yielding the key
    /// with the prefix removed alongside the value.
    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.entries.iter().filter_map(move |(key, value)| {
            key.strip_prefix(prefix)
                .map(|path| (path, value.as_str()))
        })
    }

    /// Applies every entry carrying `prefix` to `root` and returns how many
    /// were applied.
    ///
    /// `prefix` is matched verbatim; callers normalize it with
    /// [`crate::normalize_prefix`] first. Application stops at the first
    /// failure, leaving `root` partially updated.
    ///
    /// # Errors
    ///
    /// Returns the [`OverrideError`] raised by the first override that cannot
    /// be addressed.
    pub fn apply(&self, root: &mut Value, prefix: &str) -> Result<usize, OverrideError> {
        let mut applied = 0;
        for (path, value) in self.matching(prefix) {
            apply_override(root, path, value)?;
            applied += 1;
        }
        Ok(applied)
    }
}

impl<K, V> FromIterator<(K, V)> for OverrideSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, V> Extend<(K, V)> for OverrideSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
