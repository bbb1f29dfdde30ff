//! Typed configuration loading with dotted-path overrides.
//!
//! A [`ConfigurationFactory`] reads a YAML (or JSON) document, applies the
//! overrides whose keys carry its prefix, binds the result onto a
//! `serde`-deserializable type and validates it. Every failure is reported as
//! a single [`ConfigError`] naming the configuration source:
//!
//! ```text
//! config.yml has an error:
//!   * Unrecognized field at: nmae
//!     Did you mean?:
//!       - name
//!       - age
//! ```
//!
//! Overrides address the document with dotted paths such as
//! `servers[1].port`; see [`apply_override`] for the addressing rules.

mod bind;
mod document;
mod error;
mod factory;
mod overrides;
mod source;
mod validation;

pub use bind::{BIND_FAILED_TITLE, INCORRECT_TYPE_TITLE, UNRECOGNIZED_FIELD_TITLE, bind};
pub use document::{MALFORMED_TITLE, parse_document};
pub use error::{
    ConfigError, ConfigResult, ConfigResultExt, Diagnostic, DiagnosticBuilder, Location,
    ParsingError, ValidationError,
};
pub use factory::{ConfigurationFactory, DEFAULT_LABEL};
pub use overrides::{
    OverrideError, OverrideSet, PATH_SEPARATOR, PathSegment, apply_override, normalize_prefix,
};
pub use source::{ConfigurationSourceProvider, FileSourceProvider, InlineSourceProvider};
pub use validation::{
    ConstraintViolation, DefaultValidator, NoValidation, Validate, ValidationErrors, Validator,
    violations_from,
};
