//! Terminal build failures rendered as multi-line reports.
//!
//! Both report kinds open with a header naming the configuration source and
//! list one bullet per item in the order the collaborator produced them:
//!
//! ```text
//! config.yml has an error:
//!   * name must match "[\w]+[\s]+[\w]+" (was Boop)
//! ```

use std::error::Error;
use std::fmt::{self, Display};

use super::Diagnostic;
use crate::validation::ConstraintViolation;

fn write_report<T: Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    items: &[T],
) -> fmt::Result {
    if items.len() == 1 {
        writeln!(f, "{label} has an error:")?;
    } else {
        writeln!(f, "{label} has the following errors:")?;
    }
    for item in items {
        writeln!(f, "  * {item}")?;
    }
    Ok(())
}

/// The document could not be parsed or bound onto the target type.
#[derive(Debug, Clone)]
pub struct ParsingError {
    label: String,
    diagnostics: Vec<Diagnostic>,
}

impl ParsingError {
    /// Creates a report for `label` listing `diagnostics`.
    #[must_use]
    pub fn new(label: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            label: label.into(),
            diagnostics,
        }
    }

    /// Creates a report holding a single diagnostic.
    #[must_use]
    pub fn single(label: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self::new(label, vec![diagnostic])
    }

    /// Name of the configuration source, usually its path.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Diagnostics in the order they were raised.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, &self.label, &self.diagnostics)
    }
}

impl Error for ParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.diagnostics
            .first()
            .and_then(Diagnostic::cause)
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// The bound configuration violated one or more constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    label: String,
    violations: Vec<ConstraintViolation>,
}

impl ValidationError {
    /// Creates a report for `label` listing every violation.
    #[must_use]
    pub fn new(label: impl Into<String>, violations: Vec<ConstraintViolation>) -> Self {
        Self {
            label: label.into(),
            violations,
        }
    }

    /// Name of the configuration source, usually its path.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Violations in enumeration order.
    #[must_use]
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, &self.label, &self.violations)
    }
}

impl Error for ValidationError {}
