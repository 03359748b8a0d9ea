//! Error types
//!
//! Two families live here and they never mix:
//!
//! - [`ValidationError`]: the expected outcome of rejected input. Always
//!   returned as data inside an [`Outcome`](crate::foundation::Outcome), never
//!   as a Rust `Err` from `process`.
//! - [`FilterError`]: a malformed filter declaration. Returned only while a
//!   filter specification is being built.
//!
//! [`ConversionError`] is what a converter reports; filters downgrade it to an
//! `invalid_type` validation error.

use std::borrow::Cow;
use std::fmt;

use strainer_value::ValueKind;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Symbolic kind of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// The value is not of a shape or value the filter accepts.
    InvalidType,
    /// The value is absent and the filter has no default.
    Missing,
}

impl ErrorKind {
    /// Error code for programmatic handling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured validation failure attributed to one filter.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new("age", ErrorKind::InvalidType)
///     .with_detail("expected integer, got string");
/// assert_eq!(error.filter(), "age");
/// assert_eq!(error.kind(), ErrorKind::InvalidType);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationError {
    filter: String,
    kind: ErrorKind,
    path: Option<String>,
    detail: Option<Cow<'static, str>>,
}

impl ValidationError {
    /// Creates an error attributed to the filter named `filter`.
    pub fn new(filter: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            filter: filter.into(),
            kind,
            path: None,
            detail: None,
        }
    }

    /// Creates an `invalid_type` error.
    pub fn invalid_type(filter: impl Into<String>) -> Self {
        Self::new(filter, ErrorKind::InvalidType)
    }

    /// Creates a `missing` error.
    pub fn missing(filter: impl Into<String>) -> Self {
        Self::new(filter, ErrorKind::Missing)
    }

    /// Adds a human-readable detail.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Adds an "expected X, got Y" detail.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_expected(self, expected: &str, actual: ValueKind) -> Self {
        self.with_detail(format!("expected {expected}, got {actual}"))
    }

    /// Prefixes the field path with `segment`.
    ///
    /// Index segments (`[0]`) attach without a dot: `items` + `[0]` + `name`
    /// becomes `items[0].name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn within(mut self, segment: &str) -> Self {
        self.path = Some(match self.path.take() {
            None => segment.to_owned(),
            Some(rest) if rest.starts_with('[') => format!("{segment}{rest}"),
            Some(rest) => format!("{segment}.{rest}"),
        });
        self
    }

    /// Name of the filter the error is attributed to.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Field path inside a composite value, if the error came from a nested
    /// hash key or array element.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{path}] {}: {}", self.filter, self.kind)?,
            None => write!(f, "{}: {}", self.filter, self.kind)?,
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// A malformed filter specification, raised while building filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    /// The declaration is structurally invalid (missing `eq`, named attributes
    /// inside a union alternative, ...).
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A configured converter cannot be invoked.
    #[error("invalid converter: {0}")]
    InvalidConverter(String),

    /// No constructor is registered for the declared kind.
    #[error("unknown filter kind '{0}'")]
    UnknownKind(String),
}

impl FilterError {
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter(message.into())
    }

    pub fn invalid_converter(message: impl Into<String>) -> Self {
        Self::InvalidConverter(message.into())
    }
}

// ============================================================================
// CONVERTER FAILURES
// ============================================================================

/// Failure reported by a converter while transforming a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// The converter method is not defined for this kind of value.
    #[error("`{method}` is not defined for {kind}")]
    Unsupported {
        method: &'static str,
        kind: ValueKind,
    },

    /// The converter ran and rejected the value.
    #[error("{0}")]
    Failed(String),
}

impl ConversionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_path() {
        let error = ValidationError::invalid_type("status").with_detail("expected \"open\"");
        assert_eq!(error.to_string(), "status: invalid_type (expected \"open\")");
    }

    #[test]
    fn path_segments_compose() {
        let error = ValidationError::missing("name").within("[0]").within("items");
        assert_eq!(error.path(), Some("items[0]"));
        let error = ValidationError::missing("name").within("name").within("[2]").within("users");
        assert_eq!(error.path(), Some("users[2].name"));
        assert_eq!(error.to_string(), "[users[2].name] name: missing");
    }

    #[test]
    fn kind_codes() {
        assert_eq!(ErrorKind::InvalidType.as_str(), "invalid_type");
        assert_eq!(ErrorKind::Missing.to_string(), "missing");
        let json = serde_json::to_value(ValidationError::missing("x")).unwrap();
        assert_eq!(json["kind"], "missing");
    }

    #[test]
    fn filter_error_messages() {
        let error = FilterError::invalid_converter("123 is not a valid converter");
        assert_eq!(error.to_string(), "invalid converter: 123 is not a valid converter");
        assert_eq!(
            FilterError::UnknownKind("bogus".into()).to_string(),
            "unknown filter kind 'bogus'"
        );
    }

    #[test]
    fn conversion_error_messages() {
        let error = ConversionError::Unsupported {
            method: "downcase",
            kind: ValueKind::Integer,
        };
        assert_eq!(error.to_string(), "`downcase` is not defined for integer");
    }
}
