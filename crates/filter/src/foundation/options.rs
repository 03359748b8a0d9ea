//! Filter configuration.
//!
//! [`FilterOptions`] is the configuration schema every filter is built from.
//! It deserializes from JSON so specifications can live in configuration
//! files, and offers `with_*` builders for specifications written in code.
//!
//! `default` and `eq` distinguish "absent" from "present and null": a JSON
//! `"default": null` means "default to nil", while omitting the key means "no
//! default".

use serde::{Deserialize, Deserializer};
use strainer_value::Value;

use crate::foundation::{ConversionError, ConverterRef};

/// Options recognized by the built-in filters.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::foundation::FilterOptions;
/// use strainer_value::Value;
///
/// let options: FilterOptions = serde_json::from_value(serde_json::json!({
///     "eq": "update",
///     "converter": "downcase",
///     "default": null
/// })).unwrap();
/// assert_eq!(options.eq, Some(Value::from("update")));
/// assert_eq!(options.default, Some(Value::Nil));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// Value used when the raw input is absent.
    #[serde(deserialize_with = "present")]
    pub default: Option<Value>,

    /// Reference value a `value` filter compares against.
    #[serde(deserialize_with = "present")]
    pub eq: Option<Value>,

    /// Transform applied before acceptance.
    #[serde(deserialize_with = "declared")]
    pub converter: Option<ConverterRef>,

    /// Lookup used by `record` filters for values that are not yet records.
    #[serde(deserialize_with = "declared")]
    pub finder: Option<ConverterRef>,

    /// Class an `object` or `record` value must be.
    pub class: Option<String>,

    /// Class or interface an `interface` value must descend from.
    pub from: Option<String>,

    /// Methods an `interface` value must respond to.
    pub methods: Option<Vec<String>>,

    /// Whether strings are trimmed and hashes drop undeclared keys.
    pub strip: Option<bool>,

    /// Parse format for `date` filters.
    pub format: Option<String>,

    /// Free-form description, ignored by processing.
    pub desc: Option<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_eq(mut self, value: impl Into<Value>) -> Self {
        self.eq = Some(value.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_converter(mut self, converter: impl Into<ConverterRef>) -> Self {
        self.converter = Some(converter.into());
        self
    }

    /// Sets a closure converter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_converter_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.with_converter(ConverterRef::func(f))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_finder(mut self, finder: impl Into<ConverterRef>) -> Self {
        self.finder = Some(finder.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = Some(strip);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// True when a default is configured, including a nil default.
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(|v| Some(Value::from(v)))
}

fn declared<'de, D>(deserializer: D) -> Result<Option<ConverterRef>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(|v| Some(ConverterRef::Declared(Value::from(v))))
}
