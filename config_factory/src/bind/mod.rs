//! Binding of a document tree onto a typed configuration via `figment`.
//!
//! The tree is served by a [`Serialized`] provider and extracted leniently,
//! so string scalars written by overrides (`"7000"`, `"true"`) coerce into
//! numeric and boolean fields.
//!
//! Unknown fields are always rejected. Keys the target type skips are
//! recorded through `serde_ignored` and the first one fails the bind. Types
//! that also carry `#[serde(deny_unknown_fields)]` fail inside the binder
//! instead, which lets the diagnostic list every field the type accepts.

use figment::{Figment, error::Kind, providers::Serialized};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_ignored::Path;
use serde_json::Value;

use crate::error::Diagnostic;

/// Title for fields the target type does not declare.
pub const UNRECOGNIZED_FIELD_TITLE: &str = "Unrecognized field";
/// Title for values of the wrong shape or type.
pub const INCORRECT_TYPE_TITLE: &str = "Incorrect type of value";
/// Title for every other binding failure.
pub const BIND_FAILED_TITLE: &str = "Failed to parse configuration";

/// Bind `tree` onto `T`, rejecting any field `T` does not declare.
///
/// # Errors
///
/// Returns a [`Diagnostic`] describing the first binding problem.
///
/// # Examples
///
/// ```
/// use config_factory::bind;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Server {
///     port: u16,
/// }
///
/// let server: Server = bind(json!({"port": "7000"}))?;
/// assert_eq!(server.port, 7000);
///
/// let err = bind::<Server>(json!({"port": 1, "prot": 2})).err().map(|d| d.title().to_owned());
/// assert_eq!(err.as_deref(), Some("Unrecognized field"));
/// # Ok::<_, config_factory::Diagnostic>(())
/// ```
pub fn bind<T: DeserializeOwned>(tree: Value) -> Result<T, Diagnostic> {
    if !tree.is_object() {
        return Err(Diagnostic::builder(BIND_FAILED_TITLE)
            .detail(format!(
                "expected a mapping at the document root, found {}",
                node_kind(&tree)
            ))
            .build());
    }
    let Tracked { value, ignored } = Figment::from(Serialized::defaults(tree))
        .extract_lossy::<Tracked<T>>()
        .map_err(translate)?;
    match ignored.into_iter().next() {
        Some(path) => Err(unrecognized(path)),
        None => Ok(value),
    }
}

/// A bound value together with the dotted paths of the keys it skipped.
struct Tracked<T> {
    value: T,
    ignored: Vec<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tracked<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut ignored = Vec::new();
        let value = serde_ignored::deserialize(deserializer, |path| ignored.push(dotted(&path)))?;
        Ok(Self { value, ignored })
    }
}

/// Renders an ignored-key path the way figment renders error paths, with
/// sequence indices as plain segments and option wrappers elided.
fn dotted(path: &Path<'_>) -> String {
    match path {
        Path::Root => String::new(),
        Path::Seq { parent, index } => join_path(&dotted(parent), &index.to_string()),
        Path::Map { parent, key } => join_path(&dotted(parent), key),
        Path::Some { parent }
        | Path::NewtypeStruct { parent }
        | Path::NewtypeVariant { parent } => dotted(parent),
    }
}

fn unrecognized(path: String) -> Diagnostic {
    let field = path.rsplit('.').next().unwrap_or_default().to_owned();
    Diagnostic::builder(UNRECOGNIZED_FIELD_TITLE)
        .field_path(path)
        .suggestion_base(field)
        .build()
}

const fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}

/// Re-express a binder failure as a [`Diagnostic`].
pub(crate) fn translate(err: figment::Error) -> Diagnostic {
    let path = err.path.join(".");
    let builder = match &err.kind {
        Kind::UnknownField(field, expected) => Diagnostic::builder(UNRECOGNIZED_FIELD_TITLE)
            .field_path(if path.is_empty() { field.clone() } else { path })
            .suggestions(expected.iter().copied())
            .suggestion_base(field.as_str()),
        Kind::MissingField(field) => Diagnostic::builder(BIND_FAILED_TITLE)
            .field_path(join_path(&path, field))
            .detail(err.kind.to_string()),
        Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
            Diagnostic::builder(INCORRECT_TYPE_TITLE)
                .field_path(path)
                .detail(format!("is of type: {actual}, expected: {expected}"))
        }
        kind => Diagnostic::builder(BIND_FAILED_TITLE)
            .field_path(path)
            .detail(kind.to_string()),
    };
    builder.cause(err).build()
}

#[cfg(test)]
mod tests;
