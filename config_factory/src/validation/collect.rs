//! Flattening of `validator` error trees into constraint violations.

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::ConstraintViolation;

/// Struct-level errors are recorded under this key.
const SCHEMA_KEY: &str = "__all__";

/// Flattens `errors` into one violation per failed constraint.
///
/// Fields are visited in name order and list elements in index order, so the
/// result is stable across runs. Nested structs extend the path with
/// `.field` and list elements with `[index]`.
#[must_use]
pub fn violations_from(errors: &ValidationErrors) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();
    collect(errors, "", &mut violations);
    violations
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<ConstraintViolation>) {
    let mut fields: Vec<_> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    fields.sort_by(|left, right| left.0.cmp(&right.0));
    for (field, kind) in fields {
        let path = field_path(prefix, &field);
        match kind {
            ValidationErrorsKind::Field(failures) => {
                out.extend(failures.iter().map(|failure| {
                    ConstraintViolation::new(path.clone(), message(failure), rejected(failure))
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(elements) => {
                for (index, inner) in elements {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn field_path(prefix: &str, field: &str) -> String {
    if field == SCHEMA_KEY {
        prefix.to_owned()
    } else if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{prefix}.{field}")
    }
}

fn message(failure: &ValidationError) -> String {
    failure
        .message
        .as_ref()
        .map_or_else(|| describe(failure), ToString::to_string)
}

fn param(failure: &ValidationError, name: &str) -> Option<String> {
    failure.params.get(name).and_then(render)
}

fn rejected(failure: &ValidationError) -> Option<String> {
    param(failure, "value")
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Default message for constraints declared without one.
fn describe(failure: &ValidationError) -> String {
    let bound = |name: &str| param(failure, name);
    match &*failure.code {
        "required" => String::from("may not be null"),
        "range" => match (bound("min"), bound("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be greater than or equal to {min}"),
            (None, Some(max)) => format!("must be less than or equal to {max}"),
            (None, None) => String::from("is out of range"),
        },
        "length" => match (bound("equal"), bound("min"), bound("max")) {
            (Some(equal), ..) => format!("size must be {equal}"),
            (None, Some(min), Some(max)) => format!("size must be between {min} and {max}"),
            (None, Some(min), None) => format!("size must be at least {min}"),
            (None, None, Some(max)) => format!("size must be at most {max}"),
            (None, None, None) => String::from("has an invalid size"),
        },
        "regex" => String::from("must match the required pattern"),
        "email" => String::from("must be a well-formed email address"),
        "url" => String::from("must be a valid URL"),
        code => format!("failed the '{code}' constraint"),
    }
}
