//! Parsing of raw configuration bytes into a document tree.
//!
//! The tree is a [`serde_json::Value`]; object nodes keep document order.
//! YAML is parsed with `serde_yaml`, so JSON documents are accepted too.

use serde_json::{Map, Value};

use crate::error::{Diagnostic, Location};

/// Title of diagnostics raised for input the parser cannot tokenize.
pub const MALFORMED_TITLE: &str = "Malformed YAML";

/// Parse `bytes` into a document tree.
///
/// Empty documents, and documents consisting only of `null`, yield an empty
/// object so fully defaulted configurations can be bound from them.
///
/// # Errors
///
/// Returns a [`Diagnostic`] titled [`MALFORMED_TITLE`] carrying the parser
/// message and, when known, the 1-based location of the problem.
///
/// # Examples
///
/// ```
/// use config_factory::parse_document;
///
/// let tree = parse_document(b"servers:\n  - port: 8080\n")?;
/// assert_eq!(tree["servers"][0]["port"], 8080);
///
/// let err = parse_document(b"name: [unclosed").unwrap_err();
/// assert_eq!(err.title(), "Malformed YAML");
/// # Ok::<_, config_factory::Diagnostic>(())
/// ```
pub fn parse_document(bytes: &[u8]) -> Result<Value, Diagnostic> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    match serde_yaml::from_slice::<Value>(bytes) {
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(tree) => Ok(tree),
        Err(err) => Err(malformed(err)),
    }
}

fn malformed(err: serde_yaml::Error) -> Diagnostic {
    let location = err
        .location()
        .map(|mark| Location::new(mark.line(), mark.column()));
    Diagnostic::builder(MALFORMED_TITLE)
        .detail(err.to_string())
        .maybe_location(location)
        .cause(err)
        .build()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{MALFORMED_TITLE, parse_document};

    #[rstest]
    #[case::empty("")]
    #[case::blank("  \n\n")]
    #[case::explicit_null("~\n")]
    fn empty_documents_are_empty_objects(#[case] input: &str) {
        let tree = parse_document(input.as_bytes()).expect("empty document parses");
        assert_eq!(tree, json!({}));
    }

    #[rstest]
    fn json_is_accepted() {
        let tree = parse_document(br#"{"name": "Coda Hale", "servers": [{"port": 1}]}"#)
            .expect("JSON parses as YAML");
        assert_eq!(tree["servers"][0]["port"], 1);
    }

    #[rstest]
    fn keeps_document_order() {
        let tree = parse_document(b"zeta: 1\nalpha: 2\nmid: 3\n").expect("document parses");
        let keys: Vec<&str> = tree
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[rstest]
    #[case::bad_indentation("name: Coda\n  age: 1\n")]
    #[case::unclosed_flow("servers: [\n")]
    #[case::tab_indent("servers:\n\t- port: 1\n")]
    fn malformed_input_is_reported(#[case] input: &str) {
        let diagnostic = parse_document(input.as_bytes()).expect_err("input is malformed");
        assert_eq!(diagnostic.title(), MALFORMED_TITLE);
        assert!(diagnostic.detail().is_some_and(|detail| !detail.is_empty()));
        assert!(diagnostic.cause().is_some());
    }

    #[rstest]
    fn reports_location_of_problem() {
        let diagnostic =
            parse_document(b"name: ok\nservers: [1, 2\n").expect_err("input is malformed");
        let location = diagnostic.location().expect("parser reports a location");
        assert!(location.line >= 2, "unexpected location {location:?}");
    }
}
