//! Converters: user-supplied transforms applied before a value is accepted.
//!
//! A converter is configured either by naming a built-in method (from JSON
//! configuration or code) or by supplying a Rust closure. Both forms are
//! resolved once, when the filter is built; an unresolvable reference fails
//! construction with [`FilterError::InvalidConverter`].

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use strainer_value::{Value, ValueKind};

use crate::foundation::{
    ConversionError, FilterError, FilterOptions, FilterResult, Outcome, ValidationError,
};

/// Signature of a closure converter.
pub type ConverterFn = dyn Fn(&Value) -> Result<Value, ConversionError> + Send + Sync;

/// An unresolved converter reference, as it appears in [`FilterOptions`].
///
/// [`FilterOptions`]: crate::foundation::FilterOptions
#[derive(Clone)]
pub enum ConverterRef {
    /// A declared value. Only a string naming a built-in method is invocable.
    Declared(Value),
    /// A Rust closure.
    Func(Arc<ConverterFn>),
}

impl ConverterRef {
    /// Wraps a closure.
    ///
    /// The closure reports a rejected value with `Err`. A panic inside it is
    /// caught when the converter runs and treated the same way.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }
}

impl fmt::Debug for ConverterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared(value) => f.debug_tuple("Declared").field(value).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for ConverterRef {
    fn from(name: &str) -> Self {
        Self::Declared(Value::from(name))
    }
}

impl From<Value> for ConverterRef {
    fn from(value: Value) -> Self {
        Self::Declared(value)
    }
}

/// Built-in converter methods, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Downcase,
    Upcase,
    Strip,
    Capitalize,
    ToS,
    ToI,
    ToF,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "downcase" => Some(Self::Downcase),
            "upcase" => Some(Self::Upcase),
            "strip" => Some(Self::Strip),
            "capitalize" => Some(Self::Capitalize),
            "to_s" => Some(Self::ToS),
            "to_i" => Some(Self::ToI),
            "to_f" => Some(Self::ToF),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Downcase => "downcase",
            Self::Upcase => "upcase",
            Self::Strip => "strip",
            Self::Capitalize => "capitalize",
            Self::ToS => "to_s",
            Self::ToI => "to_i",
            Self::ToF => "to_f",
        }
    }

    fn apply(self, value: &Value) -> Result<Value, ConversionError> {
        let unsupported = || ConversionError::Unsupported {
            method: self.name(),
            kind: value.kind(),
        };

        match (self, value) {
            (Self::Downcase, Value::String(s)) => Ok(Value::String(s.to_lowercase())),
            (Self::Upcase, Value::String(s)) => Ok(Value::String(s.to_uppercase())),
            (Self::Strip, Value::String(s)) => Ok(Value::from(s.trim())),
            (Self::Capitalize, Value::String(s)) => {
                let mut chars = s.chars();
                let capitalized = match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                };
                Ok(Value::String(capitalized))
            }
            (Self::ToS, Value::String(_)) => Ok(value.clone()),
            (Self::ToS, Value::Integer(i)) => Ok(Value::String(i.to_string())),
            (Self::ToS, Value::Float(f)) => Ok(Value::String(f.to_string())),
            (Self::ToS, Value::Bool(b)) => Ok(Value::String(b.to_string())),
            (Self::ToS, Value::Date(d)) => Ok(Value::String(d.to_string())),
            (Self::ToI, Value::Integer(_)) => Ok(value.clone()),
            (Self::ToI, Value::Float(f)) => exact_integer(f.trunc())
                .map(Value::Integer)
                .ok_or_else(|| ConversionError::failed(format!("cannot convert {f} to integer"))),
            (Self::ToI, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| ConversionError::failed(format!("cannot convert {s:?} to integer: {e}"))),
            (Self::ToF, Value::Float(_)) => Ok(value.clone()),
            // Nearest float; integers beyond 2^53 round.
            (Self::ToF, Value::Integer(i)) => Ok(Value::Float(*i as f64)),
            (Self::ToF, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| ConversionError::failed(format!("cannot convert {s:?} to float: {e}"))),
            _ => Err(unsupported()),
        }
    }
}

/// A resolved, invocable converter.
#[derive(Clone)]
pub enum Converter {
    Method(Method),
    Func(Arc<ConverterFn>),
}

impl Converter {
    /// Resolves a reference into an invocable converter.
    pub fn resolve(reference: &ConverterRef) -> Result<Self, FilterError> {
        match reference {
            ConverterRef::Func(f) => Ok(Self::Func(Arc::clone(f))),
            ConverterRef::Declared(Value::String(name)) => Method::from_name(name)
                .map(Self::Method)
                .ok_or_else(|| {
                    FilterError::invalid_converter(format!("{name:?} is not a valid converter"))
                }),
            ConverterRef::Declared(other) => Err(FilterError::invalid_converter(format!(
                "{} is not a valid converter",
                describe(other)
            ))),
        }
    }

    /// Resolves the `converter` option, if one is configured.
    pub fn from_options(options: &FilterOptions) -> FilterResult<Option<Self>> {
        options.converter.as_ref().map(Self::resolve).transpose()
    }

    /// Invokes the converter. A panicking closure is reported as
    /// [`ConversionError::Failed`].
    pub fn call(&self, value: &Value) -> Result<Value, ConversionError> {
        match self {
            Self::Method(method) => method.apply(value),
            Self::Func(f) => panic::catch_unwind(AssertUnwindSafe(|| f(value)))
                .unwrap_or_else(|payload| Err(ConversionError::failed(panic_message(&*payload)))),
        }
    }

    /// Runs the converter on behalf of the filter named `filter`.
    ///
    /// A converter failure or a nil result rejects the value with
    /// `invalid_type`; the outcome keeps the original, unconverted value.
    pub fn apply(&self, filter: &str, value: Value) -> Outcome {
        match self.call(&value) {
            Ok(Value::Nil) => {
                tracing::debug!(filter, "converter returned nil");
                let error = ValidationError::invalid_type(filter).with_detail("converter returned nil");
                Outcome::failure(value, error)
            }
            Ok(converted) => Outcome::success(filter, converted),
            Err(error) => {
                tracing::debug!(filter, %error, "converter failed");
                let detail = error.to_string();
                Outcome::failure(value, ValidationError::invalid_type(filter).with_detail(detail))
            }
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(method) => f.debug_tuple("Method").field(method).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Runs `converter`, if any, on behalf of the filter named `filter`.
pub fn convert_with(converter: Option<&Converter>, filter: &str, value: Value) -> Outcome {
    match converter {
        Some(converter) => converter.apply(filter, value),
        None => Outcome::success(filter, value),
    }
}

/// `f` as an integer when it is whole and within `i64` range.
pub(crate) fn exact_integer(f: f64) -> Option<i64> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    i64::try_from(f as i128).ok()
}

/// `i` as a float when the float represents it exactly.
pub(crate) fn exact_float(i: i64) -> Option<f64> {
    let f = i as f64;
    (f as i128 == i128::from(i)).then_some(f)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    format!("converter panicked: {message}")
}

fn describe(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Nil => "nil".to_owned(),
        other => format!("a {}", ValueKind::from_value(other)),
    }
}
