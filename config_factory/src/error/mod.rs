//! Error types produced while building configuration.

mod diagnostic;
mod report;
mod result_ext;
mod suggest;
mod types;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Location};
pub use report::{ParsingError, ValidationError};
pub use result_ext::ConfigResultExt;
pub use types::{ConfigError, ConfigResult};

#[cfg(test)]
mod tests;
