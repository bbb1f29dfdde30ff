//! Unit tests for diagnostics, reports and the error enum.

use std::error::Error as _;
use std::io;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::suggest::{levenshtein, rank_suggestions};
use super::{ConfigError, ConfigResultExt, Diagnostic, Location, ParsingError, ValidationError};
use crate::overrides::OverrideSet;
use crate::validation::ConstraintViolation;

#[rstest]
#[case("", "", 0)]
#[case("", "abc", 3)]
#[case("abc", "abc", 0)]
#[case("kitten", "sitting", 3)]
#[case("flaw", "lawn", 2)]
#[case("prot", "port", 2)]
fn measures_edit_distance(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
    assert_eq!(levenshtein(a, b), expected);
    assert_eq!(levenshtein(b, a), expected);
}

#[rstest]
fn ranking_is_case_insensitive_and_stable() {
    let ranked = rank_suggestions("NAME", ["servers", "nam", "name", "game"]);
    assert_eq!(ranked, vec!["name", "nam", "game", "servers"]);
}

#[rstest]
fn renders_title_only() {
    let diagnostic = Diagnostic::builder("Failed to parse configuration").build();
    assert_eq!(diagnostic.to_string(), "Failed to parse configuration");
}

#[rstest]
fn renders_every_part() {
    let diagnostic = Diagnostic::builder("Incorrect type of value")
        .field_path("servers.0.port")
        .detail("is of type: string \"x\", expected: u16")
        .location(Location::new(3, 9))
        .build();
    assert_eq!(
        diagnostic.to_string(),
        "Incorrect type of value at: servers.0.port; is of type: string \"x\", \
         expected: u16 (at line 3, column 9)"
    );
}

#[rstest]
fn renders_ranked_suggestions() {
    let diagnostic = Diagnostic::builder("Unrecognized field")
        .field_path("nmae")
        .suggestions(["servers", "age", "name"])
        .suggestion_base("nmae")
        .build();
    assert_eq!(
        diagnostic.to_string(),
        "Unrecognized field at: nmae\n    Did you mean?:\n      - name\n      - age\n      - servers"
    );
    assert_eq!(diagnostic.suggestions(), ["servers", "age", "name"]);
}

#[rstest]
fn suggestions_without_base_keep_binder_order() {
    let diagnostic = Diagnostic::builder("Unrecognized field")
        .suggestions(["b", "a"])
        .build();
    assert_eq!(diagnostic.ranked_suggestions(), vec!["b", "a"]);
}

#[rstest]
fn empty_field_path_is_dropped() {
    let diagnostic = Diagnostic::builder("t").field_path("").build();
    assert_eq!(diagnostic.field_path(), None);
}

#[rstest]
fn single_diagnostic_report_uses_singular_header() {
    let report = ParsingError::single(
        "config.yml",
        Diagnostic::builder("Malformed YAML").detail("bad").build(),
    );
    assert_eq!(
        report.to_string(),
        "config.yml has an error:\n  * Malformed YAML; bad\n"
    );
}

#[rstest]
fn multiple_violations_use_plural_header() {
    let report = ValidationError::new(
        "config.yml",
        vec![
            ConstraintViolation::new("name", "may not be null", None),
            ConstraintViolation::new(
                "servers[0].port",
                "must be between 1 and 9",
                Some(String::from("0")),
            ),
        ],
    );
    let rendered = report.to_string();
    assert!(rendered.starts_with("config.yml has the following errors:\n"));
    assert!(rendered.contains("  * name may not be null (was null)\n"));
    assert!(rendered.ends_with("  * servers[0].port must be between 1 and 9 (was 0)\n"));
    assert_eq!(rendered.lines().count(), 3);
}

#[rstest]
fn parsing_report_exposes_first_cause() -> Result<()> {
    let cause = io::Error::other("underlying");
    let report = ParsingError::single(
        "config.yml",
        Diagnostic::builder("Failed to parse configuration")
            .cause(cause)
            .build(),
    );
    let source = report
        .source()
        .ok_or_else(|| anyhow!("report should expose its cause"))?;
    ensure!(source.to_string() == "underlying", "unexpected source {source}");
    Ok(())
}

#[rstest]
fn diagnostic_is_an_error_with_its_cause() -> Result<()> {
    let diagnostic = Diagnostic::builder("Malformed YAML")
        .cause(io::Error::other("bad indent"))
        .build();
    let source = diagnostic
        .source()
        .ok_or_else(|| anyhow!("diagnostic should expose its cause"))?;
    ensure!(source.to_string() == "bad indent", "unexpected source {source}");
    let bare: Box<dyn std::error::Error> = Box::new(Diagnostic::builder("Malformed YAML").build());
    ensure!(bare.source().is_none(), "no cause was recorded");
    ensure!(bare.to_string() == "Malformed YAML", "rendered {bare}");
    Ok(())
}

#[rstest]
fn config_error_accessors_match_variant() {
    let parsing = ConfigError::from(ParsingError::new("a", Vec::new()));
    assert!(parsing.as_parsing().is_some());
    assert!(parsing.as_validation().is_none());

    let validation = ConfigError::from(ValidationError::new("a", Vec::new()));
    assert!(validation.as_validation().is_some());
    assert!(validation.as_override().is_none());
}

#[rstest]
fn io_error_names_label_and_keeps_source() -> Result<()> {
    let err = ConfigError::io("missing.yml", io::Error::from(io::ErrorKind::NotFound));
    ensure!(
        err.to_string().starts_with("failed to read configuration 'missing.yml'"),
        "unexpected message {err}"
    );
    ensure!(err.source().is_some(), "io source missing");
    Ok(())
}

#[rstest]
fn override_failures_convert_into_config_errors() -> Result<()> {
    let mut doc = serde_json::json!({"servers": [1]});
    let err = OverrideSet::new()
        .with("dw.servers.port", "1")
        .apply(&mut doc, "dw.")
        .into_config()
        .err()
        .ok_or_else(|| anyhow!("expected override failure"))?;
    ensure!(err.as_override().is_some(), "unexpected error {err:?}");
    ensure!(
        err.to_string().contains("target is an array but no index specified"),
        "unexpected message {err}"
    );
    Ok(())
}
