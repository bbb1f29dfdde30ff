//! Structured description of a single configuration-processing failure.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::suggest::rank_suggestions;

/// Position in the source document, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Location {
    /// Creates a location from 1-based coordinates.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A renderable diagnostic with a title and whichever of detail, location,
/// field path and suggestions apply to its failure kind.
///
/// # Examples
///
/// ```
/// use config_factory::Diagnostic;
///
/// let diagnostic = Diagnostic::builder("Unrecognized field")
///     .field_path("servers.0.prot")
///     .suggestions(["port", "host"])
///     .suggestion_base("prot")
///     .build();
/// assert_eq!(diagnostic.ranked_suggestions(), vec!["port", "host"]);
/// assert!(diagnostic.to_string().starts_with("Unrecognized field at: servers.0.prot"));
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    title: String,
    detail: Option<String>,
    location: Option<Location>,
    field_path: Option<String>,
    suggestions: Vec<String>,
    suggestion_base: Option<String>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl Diagnostic {
    /// Starts building a diagnostic with the given title.
    #[must_use]
    pub fn builder(title: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder {
            inner: Self {
                title: title.into(),
                detail: None,
                location: None,
                field_path: None,
                suggestions: Vec::new(),
                suggestion_base: None,
                cause: None,
            },
        }
    }

    /// Short summary of the failure.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer explanation, usually the collaborator's own message.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Position in the source document.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    /// Dotted path to the offending field.
    #[must_use]
    pub fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }

    /// Field names the binder would have accepted, in binder order.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Term the suggestions are ranked against.
    #[must_use]
    pub fn suggestion_base(&self) -> Option<&str> {
        self.suggestion_base.as_deref()
    }

    /// Suggestions ordered by edit distance to the suggestion base.
    ///
    /// Ties keep binder order; without a base the binder order is returned.
    #[must_use]
    pub fn ranked_suggestions(&self) -> Vec<&str> {
        let names = self.suggestions.iter().map(String::as_str);
        match self.suggestion_base.as_deref() {
            Some(base) => rank_suggestions(base, names),
            None => names.collect(),
        }
    }

    /// Underlying collaborator error.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if let Some(path) = &self.field_path {
            write!(f, " at: {path}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "; {detail}")?;
        }
        if let Some(location) = self.location {
            write!(f, " (at {location})")?;
        }
        let ranked = self.ranked_suggestions();
        if !ranked.is_empty() {
            write!(f, "\n    Did you mean?:")?;
            for name in ranked {
                write!(f, "\n      - {name}")?;
            }
        }
        Ok(())
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Builder for [`Diagnostic`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DiagnosticBuilder {
    inner: Diagnostic,
}

impl DiagnosticBuilder {
    /// Sets the detail text.
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.inner.detail = Some(detail.into());
        self
    }

    /// Sets the source location.
    pub fn location(mut self, location: Location) -> Self {
        self.inner.location = Some(location);
        self
    }

    /// Sets the source location when one is available.
    pub fn maybe_location(mut self, location: Option<Location>) -> Self {
        self.inner.location = location;
        self
    }

    /// Sets the dotted field path; empty paths are ignored.
    pub fn field_path(mut self, path: impl Into<String>) -> Self {
        let dotted = path.into();
        self.inner.field_path = (!dotted.is_empty()).then_some(dotted);
        self
    }

    /// Appends suggested field names.
    pub fn suggestions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.suggestions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the term suggestions are ranked against.
    pub fn suggestion_base(mut self, base: impl Into<String>) -> Self {
        self.inner.suggestion_base = Some(base.into());
        self
    }

    /// Records the underlying error.
    pub fn cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.inner.cause = Some(Arc::new(cause));
        self
    }

    /// Finishes the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.inner
    }
}
