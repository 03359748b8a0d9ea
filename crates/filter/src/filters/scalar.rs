//! Scalar filters: `integer`, `float`, `string`, `boolean` and `date`.
//!
//! `matches` is a strict kind check, which is what a union checks. A
//! standalone `process` goes through the standard cast, so a value of the
//! wrong kind is coerced when the coercion is lossless (`"42"` to `42`,
//! `3` to `3.0`, `"2024-01-31"` to a date). A float outside `i64` range, or
//! an integer too large for a float to hold exactly, is left as is and fails.

use std::fmt;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use strainer_value::Value;

use crate::foundation::converter::{exact_float, exact_integer};
use crate::foundation::{
    Converter, Filter, FilterError, FilterOptions, FilterResult, Outcome, ValidationContext,
    convert_with, standard_cast,
};
use crate::registry::kind;

/// Default parse format for date filters.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Integer,
    Float,
    String,
    Boolean,
    Date,
}

impl ScalarKind {
    pub const ALL: [Self; 5] = [
        Self::Integer,
        Self::Float,
        Self::String,
        Self::Boolean,
        Self::Date,
    ];

    /// Kind tag in the registry.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Integer => kind::INTEGER,
            Self::Float => kind::FLOAT,
            Self::String => kind::STRING,
            Self::Boolean => kind::BOOLEAN,
            Self::Date => kind::DATE,
        }
    }

    /// Whether `value` already is of this kind.
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_))
                | (Self::String, Value::String(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Date, Value::Date(_))
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A leaf filter accepting one scalar kind.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::filters::{ScalarFilter, ScalarKind};
/// use strainer_filter::foundation::{process_value, Filter, FilterOptions};
/// use strainer_value::Value;
///
/// let age = ScalarFilter::new(ScalarKind::Integer, "age", FilterOptions::new()).unwrap();
/// assert!(!age.matches(&Value::from("42")));
/// assert_eq!(process_value(&age, "42").into_result(), Ok(Value::from(42)));
/// ```
#[derive(Debug)]
pub struct ScalarFilter {
    kind: ScalarKind,
    name: String,
    options: FilterOptions,
    converter: Option<Converter>,
    format: String,
}

impl ScalarFilter {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidConverter`] for a converter that cannot be
    /// invoked and [`FilterError::InvalidFilter`] for a malformed date format.
    pub fn new(kind: ScalarKind, name: impl Into<String>, options: FilterOptions) -> FilterResult<Self> {
        let converter = Converter::from_options(&options)?;
        let format = options
            .format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_owned());

        if kind == ScalarKind::Date && StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(FilterError::invalid_filter(format!("invalid date format {format:?}")));
        }

        Ok(Self {
            kind,
            name: name.into(),
            options,
            converter,
            format,
        })
    }

    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }

    fn strips(&self) -> bool {
        self.options.strip.unwrap_or(true)
    }

    fn coerce(&self, value: Value) -> Value {
        match (self.kind, value) {
            (ScalarKind::Integer, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::String(s),
            },
            (ScalarKind::Integer, Value::Float(f)) => {
                exact_integer(f).map_or(Value::Float(f), Value::Integer)
            }
            (ScalarKind::Float, Value::Integer(i)) => {
                exact_float(i).map_or(Value::Integer(i), Value::Float)
            }
            (ScalarKind::Float, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Value::Float(f),
                _ => Value::String(s),
            },
            (ScalarKind::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "on" => Value::Bool(true),
                "false" | "0" | "off" => Value::Bool(false),
                _ => Value::String(s),
            },
            (ScalarKind::Date, Value::String(s)) => {
                match NaiveDate::parse_from_str(s.trim(), &self.format) {
                    Ok(date) => Value::Date(date),
                    Err(_) => Value::String(s),
                }
            }
            (_, other) => other,
        }
    }
}

impl Filter for ScalarFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        self.kind.tag()
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        self.kind.accepts(value)
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
            .and_then(|value| Outcome::success(self.name.as_str(), self.coerce(value)))
    }

    fn cast(&self, value: Value, _ctx: &ValidationContext) -> Outcome {
        let outcome = standard_cast(self, value);
        if self.kind != ScalarKind::String || !self.strips() {
            return outcome;
        }
        outcome.and_then(|value| match value {
            Value::String(s) if s.trim().len() != s.len() => {
                Outcome::success(self.name.as_str(), Value::from(s.trim()))
            }
            other => Outcome::success(self.name.as_str(), other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, ValidationError, process_value};
    use rstest::rstest;

    fn scalar(kind: ScalarKind) -> ScalarFilter {
        ScalarFilter::new(kind, "field", FilterOptions::new()).unwrap()
    }

    #[rstest]
    #[case(ScalarKind::Integer, Value::from("42"), Value::from(42))]
    #[case(ScalarKind::Integer, Value::from(7.0), Value::from(7))]
    #[case(ScalarKind::Integer, Value::from(-9.0e15), Value::from(-9_000_000_000_000_000_i64))]
    #[case(ScalarKind::Float, Value::from(1_i64 << 53), Value::from(9_007_199_254_740_992.0))]
    #[case(ScalarKind::Float, Value::from(3), Value::from(3.0))]
    #[case(ScalarKind::Float, Value::from(" 2.5"), Value::from(2.5))]
    #[case(ScalarKind::String, Value::from("  padded "), Value::from("padded"))]
    #[case(ScalarKind::Boolean, Value::from("on"), Value::from(true))]
    #[case(ScalarKind::Boolean, Value::from("FALSE"), Value::from(false))]
    #[case(
        ScalarKind::Date,
        Value::from("2024-01-31"),
        Value::from(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
    )]
    fn standalone_cast_coerces(#[case] kind: ScalarKind, #[case] input: Value, #[case] expected: Value) {
        assert_eq!(process_value(&scalar(kind), input).into_result(), Ok(expected));
    }

    #[rstest]
    #[case(ScalarKind::Integer, Value::from(7.5))]
    #[case(ScalarKind::Integer, Value::from("seven"))]
    #[case(ScalarKind::Integer, Value::from(1.0e20))]
    #[case(ScalarKind::Integer, Value::from(-1.0e19))]
    #[case(ScalarKind::Float, Value::from(i64::MAX))]
    #[case(ScalarKind::Float, Value::from("NaN"))]
    #[case(ScalarKind::String, Value::from(1))]
    #[case(ScalarKind::Boolean, Value::from("maybe"))]
    #[case(ScalarKind::Date, Value::from("31/01/2024"))]
    fn uncoercible_values_are_invalid(#[case] kind: ScalarKind, #[case] input: Value) {
        let outcome = process_value(&scalar(kind), input.clone());
        assert_eq!(outcome.error().map(ValidationError::kind), Some(ErrorKind::InvalidType));
        assert_eq!(outcome.value(), &input);
    }

    #[test]
    fn matches_is_strict() {
        assert!(!scalar(ScalarKind::Integer).matches(&Value::from("1")));
        assert!(!scalar(ScalarKind::Float).matches(&Value::from(1)));
        assert!(scalar(ScalarKind::String).matches(&Value::from("")));
    }

    #[test]
    fn strip_can_be_disabled() {
        let filter =
            ScalarFilter::new(ScalarKind::String, "raw", FilterOptions::new().with_strip(false)).unwrap();
        assert_eq!(process_value(&filter, " x ").into_value(), Value::from(" x "));
    }

    #[test]
    fn custom_date_format() {
        let options = FilterOptions::new().with_format("%d/%m/%Y");
        let filter = ScalarFilter::new(ScalarKind::Date, "on", options).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(process_value(&filter, "31/01/2024").into_result(), Ok(Value::from(expected)));

        let error = ScalarFilter::new(ScalarKind::Date, "on", FilterOptions::new().with_format("%Q"))
            .unwrap_err();
        assert!(matches!(error, FilterError::InvalidFilter(_)));
    }

    #[test]
    fn missing_without_default() {
        let outcome = process_value(&scalar(ScalarKind::Integer), Value::Nil);
        assert_eq!(outcome.error().map(ValidationError::kind), Some(ErrorKind::Missing));
        assert_eq!(outcome.filter(), "field");
    }

    #[test]
    fn converter_runs_before_coercion() {
        let options = FilterOptions::new().with_converter("strip");
        let filter = ScalarFilter::new(ScalarKind::Integer, "n", options).unwrap();
        assert_eq!(process_value(&filter, " 9 ").into_result(), Ok(Value::from(9)));
        assert_eq!(filter.scalar_kind(), ScalarKind::Integer);
        assert_eq!(ScalarKind::Date.to_string(), "date");
    }
}
