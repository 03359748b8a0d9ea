//! Host object filters: `object`, `record` and `interface`.

use strainer_value::Value;

use crate::foundation::{
    Converter, Filter, FilterError, FilterOptions, FilterResult, Outcome, convert_with,
};
use crate::registry::kind;

/// Accepts host objects of a class (or a subclass of it).
///
/// An `object` filter may carry a `converter` that turns other values into
/// objects; a `record` filter carries a `finder` that looks records up, for
/// example by id. Either runs only for values that are not yet objects of the
/// class.
#[derive(Debug)]
pub struct ObjectFilter {
    kind: &'static str,
    name: String,
    options: FilterOptions,
    class: String,
    converter: Option<Converter>,
}

impl ObjectFilter {
    /// Builds an `object` filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] without a `class`, and
    /// [`FilterError::InvalidConverter`] for a converter that cannot be
    /// invoked.
    pub fn object(name: impl Into<String>, options: FilterOptions) -> FilterResult<Self> {
        let converter = Converter::from_options(&options)?;
        Self::with_converter(kind::OBJECT, name.into(), options, converter)
    }

    /// Builds a `record` filter; its `finder` plays the converter's role.
    ///
    /// # Errors
    ///
    /// As for [`ObjectFilter::object`], with the `finder` in place of the
    /// converter.
    pub fn record(name: impl Into<String>, options: FilterOptions) -> FilterResult<Self> {
        let finder = options.finder.as_ref().map(Converter::resolve).transpose()?;
        Self::with_converter(kind::RECORD, name.into(), options, finder)
    }

    fn with_converter(
        kind: &'static str,
        name: String,
        options: FilterOptions,
        converter: Option<Converter>,
    ) -> FilterResult<Self> {
        let class = options
            .class
            .clone()
            .filter(|class| !class.is_empty())
            .ok_or_else(|| FilterError::invalid_filter(format!("{kind} filter '{name}' requires a class")))?;

        Ok(Self {
            kind,
            name,
            options,
            class,
            converter,
        })
    }

    pub fn class(&self) -> &str {
        &self.class
    }
}

impl Filter for ObjectFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        self.kind
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        value.as_object().is_some_and(|object| object.is_a(&self.class))
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }
}

/// Accepts host objects that descend from `from` and respond to every name in
/// `methods`. At least one of the two must be configured. A `converter` runs
/// for values that do not match yet.
#[derive(Debug)]
pub struct InterfaceFilter {
    name: String,
    options: FilterOptions,
    from: Option<String>,
    methods: Vec<String>,
    converter: Option<Converter>,
}

impl InterfaceFilter {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] when neither `from` nor `methods` is
    /// configured, and [`FilterError::InvalidConverter`] for a converter that
    /// cannot be invoked.
    pub fn new(name: impl Into<String>, options: FilterOptions) -> FilterResult<Self> {
        let name = name.into();
        if options.from.is_none() && options.methods.is_none() {
            return Err(FilterError::invalid_filter(format!(
                "interface filter '{name}' requires from or methods"
            )));
        }

        Ok(Self {
            from: options.from.clone(),
            methods: options.methods.clone().unwrap_or_default(),
            converter: Converter::from_options(&options)?,
            name,
            options,
        })
    }
}

impl Filter for InterfaceFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        kind::INTERFACE
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        self.from.as_deref().is_none_or(|from| object.is_a(from))
            && self.methods.iter().all(|method| object.responds_to(method))
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }
}
