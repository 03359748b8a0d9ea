//! The outcome of processing one value against one filter.

use strainer_value::Value;

use crate::foundation::ValidationError;

/// Result of a `process`, `cast` or `convert` call.
///
/// Carries the filter that produced it, the resulting value and at most one
/// error. The value is present even when the outcome failed: it is the best
/// effort (original or partially converted) value, kept for diagnostics.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::foundation::{Outcome, ValidationError};
/// use strainer_value::Value;
///
/// let ok = Outcome::success("age", Value::from(42));
/// assert!(ok.is_success());
///
/// let failed = Outcome::failure(Value::from("x"), ValidationError::invalid_type("age"));
/// assert!(failed.has_error());
/// assert_eq!(failed.value(), &Value::from("x"));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[must_use = "outcome must be checked"]
pub struct Outcome {
    filter: String,
    value: Value,
    error: Option<ValidationError>,
}

impl Outcome {
    /// A successful outcome produced by the filter named `filter`.
    pub fn success(filter: impl Into<String>, value: Value) -> Self {
        Self {
            filter: filter.into(),
            value,
            error: None,
        }
    }

    /// A failed outcome. The producing filter is the one the error is
    /// attributed to.
    pub fn failure(value: Value, error: ValidationError) -> Self {
        Self {
            filter: error.filter().to_owned(),
            value,
            error: Some(error),
        }
    }

    /// Name of the filter that produced this outcome.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Splits into value and error.
    pub fn into_parts(self) -> (Value, Option<ValidationError>) {
        (self.value, self.error)
    }

    /// Converts into a standard `Result`, dropping the diagnostic value on
    /// failure.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self.error {
            None => Ok(self.value),
            Some(error) => Err(error),
        }
    }

    /// Transforms the value of a successful outcome; failures pass through.
    pub fn and_then(self, f: impl FnOnce(Value) -> Self) -> Self {
        if self.error.is_some() {
            self
        } else {
            f(self.value)
        }
    }
}
