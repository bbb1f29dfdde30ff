//! Path addressing for override keys.

use serde_json::{Map, Value};

use super::{OverrideError, PATH_SEPARATOR};

/// One dot-delimited component of an override path.
///
/// A segment is either a plain key (`port`) or a key followed by an array
/// index (`servers[2]`).
///
/// # Examples
///
/// ```
/// use config_factory::PathSegment;
///
/// let segment = PathSegment::parse("servers[2]");
/// assert_eq!(segment.key(), "servers");
/// assert_eq!(segment.index(), Some(2));
///
/// let plain = PathSegment::parse("port");
/// assert_eq!(plain.index(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment<'a> {
    key: &'a str,
    index: Option<usize>,
}

impl<'a> PathSegment<'a> {
    /// Parse a single segment.
    ///
    /// Text that does not end in `[<digits>]`, or whose key before the
    /// bracket is empty, is treated as a plain key. Indices too large for
    /// `usize` saturate, which always lands out of bounds.
    #[must_use]
    pub fn parse(segment: &'a str) -> Self {
        split_index(segment).map_or(
            Self {
                key: segment,
                index: None,
            },
            |(key, index)| Self {
                key,
                index: Some(index),
            },
        )
    }

    /// Key addressed by this segment.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.key
    }

    /// Array index suffix, when present.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

fn split_index(segment: &str) -> Option<(&str, usize)> {
    let inner = segment.strip_suffix(']')?;
    let (key, digits) = inner.rsplit_once('[')?;
    if key.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((key, digits.parse().unwrap_or(usize::MAX)))
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Resolve the array element addressed by `key[index]` under `obj`.
fn indexed_element<'v>(
    obj: &'v mut Map<String, Value>,
    segment: PathSegment<'_>,
    index: usize,
    name: &str,
) -> Result<&'v mut Value, OverrideError> {
    let Some(node) = obj.get_mut(segment.key()) else {
        return Err(OverrideError::index_not_found(name));
    };
    let Value::Array(items) = node else {
        return Err(OverrideError::not_an_array(name));
    };
    let len = items.len();
    items
        .get_mut(index)
        .ok_or_else(|| OverrideError::index_out_of_bounds(name, index, len))
}

/// Set the scalar at dotted path `name` under `root` to the string `value`.
///
/// Segments are walked left to right. Before each hop, if the whole remaining
/// path exists as a literal key holding a scalar, that key is overwritten and
/// the walk stops; this lets keys such as `settings.enabled` be addressed
/// atomically. Missing intermediate keys are created as empty objects. Arrays
/// are only entered through an explicit index on an intermediate segment and
/// are never resized; the final segment is always written as a literal key,
/// so `tags[1]` sets a key named `tags[1]` beside the `tags` array.
///
/// # Errors
///
/// Returns an [`OverrideError`] describing why the path cannot be addressed.
///
/// # Examples
///
/// ```
/// use config_factory::apply_override;
/// use serde_json::json;
///
/// let mut doc = json!({"servers": [{"port": 8080}, {"port": 8081}]});
/// apply_override(&mut doc, "servers[1].port", "9000")?;
/// apply_override(&mut doc, "logging.level", "DEBUG")?;
/// assert_eq!(doc["servers"][1]["port"], "9000");
/// assert_eq!(doc["logging"]["level"], "DEBUG");
/// # Ok::<_, config_factory::OverrideError>(())
/// ```
pub fn apply_override(root: &mut Value, name: &str, value: &str) -> Result<(), OverrideError> {
    let parts: Vec<&str> = name.split(PATH_SEPARATOR).map(str::trim).collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(OverrideError::invalid_path(name));
    }
    let last = parts.len().saturating_sub(1);

    let mut node = root;
    for (position, key) in parts.iter().copied().enumerate() {
        let Value::Object(obj) = node else {
            return Err(OverrideError::invalid_path(name));
        };

        if position < last {
            let remaining = parts.get(position..).unwrap_or_default().join(".");
            if obj.get(&remaining).is_some_and(is_scalar) {
                obj.insert(remaining, Value::String(value.to_owned()));
                return Ok(());
            }
        }

        if position == last {
            obj.insert(key.to_owned(), Value::String(value.to_owned()));
            return Ok(());
        }

        let segment = PathSegment::parse(key);
        let child = match segment.index() {
            Some(index) => indexed_element(obj, segment, index, name)?,
            None => obj
                .entry(key)
                .or_insert_with(|| Value::Object(Map::new())),
        };
        if child.is_array() {
            return Err(OverrideError::ambiguous_array_target(name));
        }
        node = child;
    }
    Ok(())
}
