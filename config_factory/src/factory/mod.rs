//! Orchestration of a configuration build.
//!
//! A build reads the source, parses it into a document tree, applies the
//! prefixed overrides, binds the tree onto the target type and validates the
//! result. The first stage to fail terminates the build with a single error.

use std::fmt;
use std::io::Read;
use std::marker::PhantomData;
use std::sync::Arc;

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::bind::bind;
use crate::document::parse_document;
use crate::error::{ConfigError, ConfigResult, ConfigResultExt, ParsingError, ValidationError};
use crate::overrides::{OverrideSet, normalize_prefix};
use crate::source::{ConfigurationSourceProvider, FileSourceProvider};
use crate::validation::{DefaultValidator, Validator};

/// Label used by [`ConfigurationFactory::build_default`].
pub const DEFAULT_LABEL: &str = "default configuration";

/// Builds validated configuration objects of type `T`.
///
/// The factory is immutable once configured and may be reused for any number
/// of builds; each build is independent.
///
/// # Examples
///
/// ```
/// use config_factory::{ConfigurationFactory, InlineSourceProvider, OverrideSet, Validate};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Validate)]
/// #[serde(deny_unknown_fields)]
/// struct AppConfig {
///     #[validate(length(min = 1))]
///     name: String,
///     #[serde(default)]
///     port: u16,
/// }
///
/// let provider = InlineSourceProvider::new().with("app.yml", "name: demo\nport: 80\n");
/// let factory = ConfigurationFactory::<AppConfig>::new("app")
///     .with_overrides(OverrideSet::new().with("app.port", "8080"));
/// let config = factory.build_from(&provider, "app.yml")?;
/// assert_eq!(config.port, 8080);
/// # Ok::<_, std::sync::Arc<config_factory::ConfigError>>(())
/// ```
pub struct ConfigurationFactory<T, V = DefaultValidator> {
    prefix: String,
    validator: V,
    overrides: OverrideSet,
    target: PhantomData<fn() -> T>,
}

impl<T> ConfigurationFactory<T> {
    /// Creates a factory drawing overrides under `prefix`, validating with
    /// the target's own constraints and starting with no overrides.
    ///
    /// The prefix is normalized to end with `.`, so `"dw"` and `"dw."` are
    /// equivalent.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            validator: DefaultValidator,
            overrides: OverrideSet::new(),
            target: PhantomData,
        }
    }
}

impl<T, V> ConfigurationFactory<T, V> {
    /// Replaces the validator.
    #[must_use]
    pub fn with_validator<W>(self, validator: W) -> ConfigurationFactory<T, W> {
        ConfigurationFactory {
            prefix: self.prefix,
            validator,
            overrides: self.overrides,
            target: PhantomData,
        }
    }

    /// Replaces the key/value store overrides are drawn from.
    #[must_use]
    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }

    /// Normalized override prefix, always ending with `.`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Store overrides are drawn from.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }
}

impl<T, V> ConfigurationFactory<T, V>
where
    T: DeserializeOwned,
    V: Validator<T>,
{
    /// Builds a configuration from the source `label` opened via `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the source cannot be read,
    /// [`ConfigError::Parsing`] when it is malformed or cannot be bound,
    /// [`ConfigError::Override`] when an override cannot be applied and
    /// [`ConfigError::Validation`] when the bound value violates its
    /// constraints.
    pub fn build_from<P>(&self, provider: &P, label: &str) -> ConfigResult<T>
    where
        P: ConfigurationSourceProvider + ?Sized,
    {
        tracing::debug!(label, "building configuration");
        let bytes = read_source(provider, label)?;
        let tree = parse_document(&bytes)
            .map_err(|diagnostic| ParsingError::single(label, diagnostic))
            .into_config()?;
        self.build_tree(tree, label)
    }

    /// Builds a configuration from the file at `path`, using the path as the
    /// label in diagnostics.
    ///
    /// # Errors
    ///
    /// As for [`ConfigurationFactory::build_from`].
    pub fn build_file(&self, path: &Utf8Path) -> ConfigResult<T> {
        self.build_from(&FileSourceProvider, path.as_str())
    }

    /// Builds a configuration from an empty document, for types whose fields
    /// all have defaults. Overrides still apply.
    ///
    /// # Errors
    ///
    /// As for [`ConfigurationFactory::build_from`], except that no I/O is
    /// performed.
    pub fn build_default(&self) -> ConfigResult<T> {
        tracing::debug!(label = DEFAULT_LABEL, "building configuration");
        self.build_tree(Value::Object(Map::new()), DEFAULT_LABEL)
    }

    fn build_tree(&self, mut tree: Value, label: &str) -> ConfigResult<T> {
        let applied = self.overrides.apply(&mut tree, &self.prefix).into_config()?;
        tracing::debug!(label, applied, prefix = %self.prefix, "applied configuration overrides");

        let config: T = bind(tree)
            .map_err(|diagnostic| ParsingError::single(label, diagnostic))
            .into_config()?;

        let violations = self.validator.validate(&config);
        if !violations.is_empty() {
            tracing::debug!(label, count = violations.len(), "configuration failed validation");
            return Err(Arc::new(ValidationError::new(label, violations).into()));
        }
        tracing::debug!(label, "configuration built");
        Ok(config)
    }
}

/// Reads the whole source; the stream is closed before returning.
fn read_source<P>(provider: &P, label: &str) -> ConfigResult<Vec<u8>>
where
    P: ConfigurationSourceProvider + ?Sized,
{
    let mut reader = provider
        .open(label)
        .map_err(|err| ConfigError::io(label, err))?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| ConfigError::io(label, err))?;
    Ok(bytes)
}

// A derived impl would demand `T: Clone`.
impl<T, V: Clone> Clone for ConfigurationFactory<T, V> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            validator: self.validator.clone(),
            overrides: self.overrides.clone(),
            target: PhantomData,
        }
    }
}

impl<T, V: fmt::Debug> fmt::Debug for ConfigurationFactory<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationFactory")
            .field("target", &std::any::type_name::<T>())
            .field("prefix", &self.prefix)
            .field("validator", &self.validator)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}
