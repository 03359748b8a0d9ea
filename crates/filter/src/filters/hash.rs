//! Hash filter: a string-keyed value whose declared keys each pass a nested
//! filter.

use std::fmt;

use indexmap::IndexMap;
use strainer_value::{Hash, Value};

use crate::declare::FilterDecl;
use crate::foundation::{
    Converter, Filter, FilterError, FilterOptions, FilterResult, Outcome, ValidationContext,
    ValidationError, convert_with,
};
use crate::registry::{kind, FilterRegistry};

static NIL: Value = Value::Nil;

/// Validates a hash key by key.
///
/// Each nested filter is named after the key it validates. Processing builds
/// a new hash in declaration order; undeclared keys are dropped unless
/// `strip: false`. A hash filter without nested filters accepts any hash
/// as is. A `converter` runs for present values that are not hashes.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::declare::FilterDecl;
/// use strainer_filter::foundation::process_value;
/// use strainer_filter::FilterRegistry;
/// use strainer_value::Value;
///
/// let profile = FilterRegistry::default()
///     .build(FilterDecl::hash().named("profile").with_filter(FilterDecl::integer().named("age")))
///     .unwrap();
///
/// let input = serde_json::json!({"age": "42", "admin": true});
/// let expected = Value::from(serde_json::json!({"age": 42}));
/// assert_eq!(process_value(profile.as_ref(), input).into_result(), Ok(expected));
/// ```
pub struct HashFilter {
    name: String,
    options: FilterOptions,
    filters: IndexMap<String, Box<dyn Filter>>,
    converter: Option<Converter>,
}

impl HashFilter {
    /// Builds a hash filter from its declared body.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] for an unnamed nested declaration or a
    /// key declared twice, and [`FilterError::InvalidConverter`] for a
    /// converter that cannot be invoked.
    pub fn build(
        registry: &FilterRegistry,
        name: impl Into<String>,
        options: FilterOptions,
        body: Vec<FilterDecl>,
    ) -> FilterResult<Self> {
        let name = name.into();
        let converter = Converter::from_options(&options)?;
        let mut filters: IndexMap<String, Box<dyn Filter>> = IndexMap::new();

        for decl in body {
            if decl.names.is_empty() {
                return Err(FilterError::invalid_filter(format!(
                    "hash filter '{name}' requires nested filters to be named"
                )));
            }
            for filter in registry.build_each(decl)? {
                let key = filter.name().to_owned();
                if filters.contains_key(&key) {
                    return Err(FilterError::invalid_filter(format!(
                        "key '{key}' declared twice in hash filter '{name}'"
                    )));
                }
                filters.insert(key, filter);
            }
        }

        Ok(Self {
            name,
            options,
            filters,
            converter,
        })
    }

    /// Nested filters by key.
    pub fn filters(&self) -> &IndexMap<String, Box<dyn Filter>> {
        &self.filters
    }

    fn strips(&self) -> bool {
        self.options.strip.unwrap_or(true)
    }

    fn process_hash(&self, hash: Hash, ctx: &ValidationContext) -> Outcome {
        let mut output = Hash::with_capacity(self.filters.len());

        for (key, filter) in &self.filters {
            let raw = hash.get(key).cloned().unwrap_or_default();
            let (value, error) = filter.process(raw, ctx).into_parts();
            if let Some(error) = error {
                return Outcome::failure(Value::Hash(hash), error.within(key));
            }
            output.insert(key.clone(), value);
        }

        if !self.strips() {
            for (key, value) in &hash {
                if !output.contains_key(key) {
                    output.insert(key.clone(), value.clone());
                }
            }
        }

        Outcome::success(self.name.as_str(), Value::Hash(output))
    }
}

impl Filter for HashFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        kind::HASH
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// A hash whose declared keys all match. An absent or nil key matches
    /// only when its filter accepts nil or has a default.
    fn matches(&self, value: &Value) -> bool {
        let Some(hash) = value.as_hash() else {
            return false;
        };

        self.filters.iter().all(|(key, filter)| {
            let value = hash.get(key).unwrap_or(&NIL);
            filter.matches(value) || (value.is_nil() && filter.has_default())
        })
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }

    fn process(&self, value: Value, ctx: &ValidationContext) -> Outcome {
        let value = match value {
            Value::Hash(_) | Value::Nil => value,
            other => match self.convert(other).into_parts() {
                (value, None) => value,
                (value, Some(error)) => return Outcome::failure(value, error),
            },
        };

        match value {
            Value::Hash(hash) if self.filters.is_empty() => {
                Outcome::success(self.name.as_str(), Value::Hash(hash))
            }
            Value::Hash(hash) => self.process_hash(hash, ctx),
            Value::Nil => match self.default_value() {
                Some(default) => Outcome::success(self.name.as_str(), default.clone()),
                None => Outcome::failure(Value::Nil, ValidationError::missing(self.name.as_str())),
            },
            other => {
                let error = ValidationError::invalid_type(self.name.as_str())
                    .with_expected(kind::HASH, other.kind());
                Outcome::failure(other, error)
            }
        }
    }
}

impl fmt::Debug for HashFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashFilter")
            .field("name", &self.name)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, process_value};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(decl: FilterDecl) -> FilterResult<Box<dyn Filter>> {
        FilterRegistry::default().build(decl)
    }

    fn profile() -> Box<dyn Filter> {
        build(
            FilterDecl::hash()
                .named("profile")
                .with_filter(FilterDecl::string().named("first").named("last"))
                .with_filter(FilterDecl::integer().named("age").configure(|o| o.with_default(0))),
        )
        .unwrap()
    }

    #[test]
    fn keys_follow_declaration_order() {
        let outcome = process_value(profile().as_ref(), json!({"last": "Doe", "first": " Jane "}));
        let expected = Value::from(json!({"first": "Jane", "last": "Doe", "age": 0}));
        assert_eq!(outcome.into_result(), Ok(expected));
    }

    #[test]
    fn nested_error_carries_key_path() {
        let outcome = process_value(profile().as_ref(), json!({"first": "Jane"}));
        let error = outcome.error().unwrap();
        assert_eq!(error.filter(), "last");
        assert_eq!(error.kind(), ErrorKind::Missing);
        assert_eq!(error.path(), Some("last"));
    }

    #[test]
    fn structural_match() {
        let filter = profile();
        assert!(filter.matches(&Value::from(json!({"first": "a", "last": "b"}))));
        assert!(!filter.matches(&Value::from(json!({"first": "a"}))));
        assert!(!filter.matches(&Value::from(json!({"first": "a", "last": 1}))));
        assert!(!filter.matches(&Value::from(json!(["a"]))));
    }

    #[test]
    fn strip_false_keeps_unknown_keys() {
        let filter = build(
            FilterDecl::hash()
                .named("h")
                .configure(|o| o.with_strip(false))
                .with_filter(FilterDecl::integer().named("a")),
        )
        .unwrap();
        let outcome = process_value(filter.as_ref(), json!({"b": true, "a": 1}));
        assert_eq!(outcome.into_result(), Ok(Value::from(json!({"a": 1, "b": true}))));
    }

    #[test]
    fn empty_hash_filter_passes_through() {
        let filter = build(FilterDecl::hash().named("meta")).unwrap();
        let input = json!({"anything": [1, 2]});
        assert_eq!(process_value(filter.as_ref(), input.clone()).into_result(), Ok(Value::from(input)));
        assert!(process_value(filter.as_ref(), 1).has_error());
    }

    #[test]
    fn converter_turns_values_into_hashes() {
        let filter = build(
            FilterDecl::hash()
                .named("point")
                .configure(|o| {
                    o.with_converter_fn(|value| match value.as_integer() {
                        Some(x) => Ok(Value::from(json!({"x": x}))),
                        None => Ok(value.clone()),
                    })
                })
                .with_filter(FilterDecl::integer().named("x")),
        )
        .unwrap();

        assert_eq!(process_value(filter.as_ref(), 3).into_result(), Ok(Value::from(json!({"x": 3}))));
        assert_eq!(
            process_value(filter.as_ref(), "3").error().map(ValidationError::kind),
            Some(ErrorKind::InvalidType)
        );

        let invalid = build(FilterDecl::hash().named("h").configure(|o| o.with_converter(Value::from(123))));
        assert!(matches!(invalid, Err(FilterError::InvalidConverter(_))));
    }

    #[test]
    fn declaration_errors() {
        let unnamed = build(FilterDecl::hash().named("h").with_filter(FilterDecl::string()));
        assert!(matches!(unnamed, Err(FilterError::InvalidFilter(_))));

        let duplicate = build(
            FilterDecl::hash()
                .named("h")
                .with_filter(FilterDecl::string().named("a"))
                .with_filter(FilterDecl::integer().named("a")),
        );
        assert!(matches!(duplicate, Err(FilterError::InvalidFilter(_))));
    }
}
