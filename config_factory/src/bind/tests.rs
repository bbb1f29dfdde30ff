//! Unit tests for binding and binder error translation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

use super::{BIND_FAILED_TITLE, INCORRECT_TYPE_TITLE, UNRECOGNIZED_FIELD_TITLE, bind};
use crate::error::Diagnostic;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct Database {
    url: String,
    #[serde(default)]
    pool_size: u32,
    #[serde(default)]
    read_only: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct Settings {
    name: String,
    #[serde(default)]
    database: Option<Database>,
}

fn bind_failure<T: for<'de> Deserialize<'de> + std::fmt::Debug>(
    tree: serde_json::Value,
) -> Result<Diagnostic> {
    bind::<T>(tree)
        .err()
        .ok_or_else(|| anyhow!("expected binding to fail"))
}

#[rstest]
fn binds_matching_document() -> Result<()> {
    let settings: Settings = bind(json!({
        "name": "svc",
        "database": {"url": "postgres://", "pool_size": 4}
    }))?;
    ensure!(settings.name == "svc", "name: {settings:?}");
    ensure!(
        settings.database.as_ref().map(|db| db.pool_size) == Some(4),
        "pool size: {settings:?}"
    );
    Ok(())
}

#[rstest]
fn coerces_override_strings() -> Result<()> {
    let settings: Settings = bind(json!({
        "name": "svc",
        "database": {"url": "postgres://", "pool_size": "16", "read_only": "true"}
    }))?;
    let database = settings
        .database
        .ok_or_else(|| anyhow!("database section missing"))?;
    ensure!(database.pool_size == 16, "pool size not coerced: {database:?}");
    ensure!(database.read_only, "boolean not coerced: {database:?}");
    Ok(())
}

#[rstest]
fn unknown_field_lists_known_fields() -> Result<()> {
    let diagnostic = bind_failure::<Settings>(json!({"name": "svc", "nmae": "typo"}))?;
    ensure!(diagnostic.title() == UNRECOGNIZED_FIELD_TITLE, "title: {diagnostic}");
    ensure!(diagnostic.field_path() == Some("nmae"), "path: {diagnostic:?}");
    ensure!(diagnostic.suggestion_base() == Some("nmae"), "base: {diagnostic:?}");
    ensure!(
        diagnostic.suggestions() == ["name", "database"],
        "suggestions: {:?}",
        diagnostic.suggestions()
    );
    ensure!(
        diagnostic.ranked_suggestions().first() == Some(&"name"),
        "closest suggestion should lead"
    );
    Ok(())
}

#[rstest]
fn nested_unknown_field_carries_parent_path() -> Result<()> {
    let diagnostic = bind_failure::<Settings>(json!({
        "name": "svc",
        "database": {"url": "x", "urll": "y"}
    }))?;
    ensure!(diagnostic.title() == UNRECOGNIZED_FIELD_TITLE, "title: {diagnostic}");
    ensure!(
        diagnostic.field_path() == Some("database.urll"),
        "path: {diagnostic:?}"
    );
    ensure!(
        diagnostic.suggestions().iter().any(|name| name == "pool_size"),
        "suggestions: {:?}",
        diagnostic.suggestions()
    );
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Port {
    #[serde(default)]
    port: u16,
}

#[derive(Debug, Deserialize)]
struct Lenient {
    name: String,
    #[serde(default)]
    inner: Option<Port>,
    #[serde(default)]
    servers: Vec<Port>,
}

#[rstest]
#[case::top_level(json!({"name": "x", "nmae": "y"}), "nmae", "nmae")]
#[case::nested(json!({"name": "x", "inner": {"prot": 1}}), "inner.prot", "prot")]
#[case::listed(
    json!({"name": "x", "servers": [{"port": 1}, {"prot": 2}]}),
    "servers.1.prot",
    "prot"
)]
fn unknown_field_rejected_without_deny_attribute(
    #[case] tree: serde_json::Value,
    #[case] path: &str,
    #[case] base: &str,
) -> Result<()> {
    let diagnostic = bind_failure::<Lenient>(tree)?;
    ensure!(diagnostic.title() == UNRECOGNIZED_FIELD_TITLE, "title: {diagnostic}");
    ensure!(diagnostic.field_path() == Some(path), "path: {diagnostic:?}");
    ensure!(diagnostic.suggestion_base() == Some(base), "base: {diagnostic:?}");
    Ok(())
}

#[rstest]
fn lenient_schema_binds_known_fields() -> Result<()> {
    let lenient: Lenient = bind(json!({"name": "x", "servers": [{"port": "80"}]}))?;
    ensure!(lenient.name == "x", "name: {lenient:?}");
    ensure!(
        lenient.servers.first().map(|server| server.port) == Some(80),
        "servers: {lenient:?}"
    );
    Ok(())
}

#[rstest]
fn type_mismatch_names_observed_and_expected() -> Result<()> {
    let diagnostic = bind_failure::<Settings>(json!({
        "name": "svc",
        "database": {"url": "x", "pool_size": "lots"}
    }))?;
    ensure!(diagnostic.title() == INCORRECT_TYPE_TITLE, "title: {diagnostic}");
    let detail = diagnostic.detail().unwrap_or_default();
    ensure!(
        detail.starts_with("is of type: ") && detail.contains("expected: "),
        "detail: {detail}"
    );
    ensure!(
        diagnostic.field_path().is_some_and(|path| path.contains("pool_size")),
        "path: {diagnostic:?}"
    );
    Ok(())
}

#[rstest]
fn missing_field_is_a_generic_failure() -> Result<()> {
    let diagnostic = bind_failure::<Settings>(json!({}))?;
    ensure!(diagnostic.title() == BIND_FAILED_TITLE, "title: {diagnostic}");
    ensure!(diagnostic.field_path() == Some("name"), "path: {diagnostic:?}");
    ensure!(
        diagnostic.detail().is_some_and(|detail| detail.contains("name")),
        "detail: {diagnostic:?}"
    );
    ensure!(diagnostic.cause().is_some(), "cause not recorded");
    Ok(())
}

#[rstest]
#[case::sequence(json!([1, 2]), "a sequence")]
#[case::scalar(json!("text"), "a string")]
fn non_mapping_root_is_rejected(#[case] tree: serde_json::Value, #[case] kind: &str) -> Result<()> {
    let diagnostic = bind_failure::<Settings>(tree)?;
    ensure!(diagnostic.title() == BIND_FAILED_TITLE, "title: {diagnostic}");
    ensure!(
        diagnostic.detail().is_some_and(|detail| detail.ends_with(kind)),
        "detail: {diagnostic:?}"
    );
    Ok(())
}
