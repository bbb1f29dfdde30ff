//! Constraint validation for bound configuration.
//!
//! Configuration types declare their constraints with `#[derive(Validate)]`
//! from the `validator` crate. The factory runs a [`Validator`] over the
//! bound value and fails the build with every violation found, each one
//! flattened into a [`ConstraintViolation`] carrying its dotted path.
//!
//! # Examples
//!
//! ```
//! use config_factory::{DefaultValidator, Validate, Validator};
//!
//! #[derive(Validate)]
//! struct Server {
//!     #[validate(length(min = 1))]
//!     host: String,
//!     #[validate(range(min = 1024))]
//!     port: u16,
//! }
//!
//! let server = Server { host: String::new(), port: 80 };
//! let rendered: Vec<String> = DefaultValidator
//!     .validate(&server)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(
//!     rendered,
//!     [
//!         "host size must be at least 1 (was )",
//!         "port must be greater than or equal to 1024 (was 80)",
//!     ]
//! );
//! ```

mod collect;

use std::fmt;

pub use collect::violations_from;
pub use validator::{Validate, ValidationErrors};

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    path: String,
    message: String,
    invalid_value: Option<String>,
}

impl ConstraintViolation {
    /// Creates a violation for the field at `path`.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        message: impl Into<String>,
        invalid_value: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            invalid_value,
        }
    }

    /// Dotted path of the offending field.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Constraint message, such as `may not be null`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rendered rejected value; `None` when the field was absent.
    #[must_use]
    pub fn invalid_value(&self) -> Option<&str> {
        self.invalid_value.as_deref()
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.invalid_value.as_deref().unwrap_or("null");
        write!(f, "{} {} (was {value})", self.path, self.message)
    }
}

/// A validation engine that inspects a bound configuration.
pub trait Validator<T: ?Sized> {
    /// Returns every constraint violation found in `config`.
    fn validate(&self, config: &T) -> Vec<ConstraintViolation>;
}

/// Validator running the constraints derived through [`Validate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl<T: Validate + ?Sized> Validator<T> for DefaultValidator {
    fn validate(&self, config: &T) -> Vec<ConstraintViolation> {
        config
            .validate()
            .err()
            .map(|errors| violations_from(&errors))
            .unwrap_or_default()
    }
}

/// Validator that accepts every configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoValidation;

impl<T: ?Sized> Validator<T> for NoValidation {
    fn validate(&self, _config: &T) -> Vec<ConstraintViolation> {
        Vec::new()
    }
}
