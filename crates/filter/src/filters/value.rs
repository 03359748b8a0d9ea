//! Exact-match filter.

use strainer_value::Value;

use crate::foundation::{
    Converter, Filter, FilterError, FilterOptions, FilterResult, Outcome, ValidationContext,
    ValidationError, convert_with,
};
use crate::registry::kind;

/// Accepts a value only if it equals the configured `eq`, optionally after a
/// converter has transformed it.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::filters::ValueFilter;
/// use strainer_filter::foundation::{process_value, FilterOptions};
/// use strainer_value::Value;
///
/// let status = ValueFilter::new(
///     "status",
///     FilterOptions::new().with_eq("open").with_converter("downcase"),
/// )
/// .unwrap();
///
/// assert_eq!(process_value(&status, "OPEN").into_result(), Ok(Value::from("open")));
/// assert!(process_value(&status, "closed").has_error());
/// ```
#[derive(Debug)]
pub struct ValueFilter {
    name: String,
    options: FilterOptions,
    eq: Value,
    converter: Option<Converter>,
}

impl ValueFilter {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] when `eq` is not configured and
    /// [`FilterError::InvalidConverter`] when the converter cannot be invoked.
    pub fn new(name: impl Into<String>, options: FilterOptions) -> FilterResult<Self> {
        let eq = options.eq.clone().ok_or_else(|| {
            FilterError::invalid_filter("value filter requires :eq option to be specified")
        })?;
        let converter = Converter::from_options(&options)?;

        Ok(Self {
            name: name.into(),
            options,
            eq,
            converter,
        })
    }

    /// The reference value.
    pub const fn expected(&self) -> &Value {
        &self.eq
    }
}

impl Filter for ValueFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        kind::VALUE
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        self.eq == *value
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }

    fn cast(&self, value: Value, _ctx: &ValidationContext) -> Outcome {
        self.convert(value)
    }

    fn process(&self, value: Value, ctx: &ValidationContext) -> Outcome {
        if value.is_nil()
            && let Some(default) = self.default_value()
        {
            return Outcome::success(self.name.as_str(), default.clone());
        }

        let (value, error) = self.cast(value, ctx).into_parts();
        if let Some(error) = error {
            return Outcome::failure(value, error);
        }

        if self.matches(&value) {
            Outcome::success(self.name.as_str(), value)
        } else {
            let error = ValidationError::invalid_type(self.name.as_str())
                .with_detail(format!("expected {}", self.eq));
            Outcome::failure(value, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ConversionError, ErrorKind, process_value};
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_without_coercion() {
        let filter = ValueFilter::new("n", FilterOptions::new().with_eq(1)).unwrap();
        assert!(process_value(&filter, 1).is_success());
        assert!(process_value(&filter, 1.0).has_error());
        assert!(process_value(&filter, "1").has_error());
    }

    #[test]
    fn failure_detail_names_the_reference() {
        let filter = ValueFilter::new("status", FilterOptions::new().with_eq("open")).unwrap();
        let outcome = process_value(&filter, "closed");
        let error = outcome.error().unwrap();
        assert_eq!(error.kind(), ErrorKind::InvalidType);
        assert_eq!(error.to_string(), "status: invalid_type (expected \"open\")");
        assert_eq!(outcome.value(), &Value::from("closed"));
    }

    #[test]
    fn nil_reference() {
        let filter = ValueFilter::new("gone", FilterOptions::new().with_eq(Value::Nil)).unwrap();
        assert_eq!(process_value(&filter, Value::Nil).into_result(), Ok(Value::Nil));
        assert!(process_value(&filter, 0).has_error());
    }

    #[test]
    fn absent_value_takes_default() {
        let options = FilterOptions::new().with_eq("open").with_default("open");
        let filter = ValueFilter::new("status", options).unwrap();
        assert_eq!(process_value(&filter, Value::Nil).into_result(), Ok(Value::from("open")));
    }

    #[test]
    fn converter_failure_keeps_original_value() {
        let options = FilterOptions::new()
            .with_eq("x")
            .with_converter_fn(|_| Err(ConversionError::failed("nope")));
        let filter = ValueFilter::new("status", options).unwrap();
        let outcome = process_value(&filter, "X");
        assert_eq!(outcome.value(), &Value::from("X"));
        assert_eq!(outcome.error().and_then(ValidationError::detail), Some("nope"));
        assert_eq!(filter.expected(), &Value::from("x"));
    }
}
