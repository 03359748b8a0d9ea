//! Array filter: a list whose elements all pass one element filter.

use strainer_value::Value;

use crate::declare::FilterDecl;
use crate::filters::union::inject_identity;
use crate::foundation::{
    Converter, Filter, FilterError, FilterOptions, FilterResult, Outcome, ValidationContext,
    ValidationError, convert_with,
};
use crate::registry::{kind, FilterRegistry};

/// Validates every element of an array against an optional element filter.
///
/// The element filter is anonymous in the declaration and takes the array's
/// name. Without one, any array is accepted as is. A `converter` runs for
/// present values that are not arrays.
#[derive(Debug)]
pub struct ArrayFilter {
    name: String,
    options: FilterOptions,
    element: Option<Box<dyn Filter>>,
    converter: Option<Converter>,
}

impl ArrayFilter {
    /// Builds an array filter from its declared body.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] when the body has more than one entry or
    /// the entry carries attribute names, and
    /// [`FilterError::InvalidConverter`] for a converter that cannot be
    /// invoked.
    pub fn build(
        registry: &FilterRegistry,
        name: impl Into<String>,
        options: FilterOptions,
        body: Vec<FilterDecl>,
    ) -> FilterResult<Self> {
        let name = name.into();
        let converter = Converter::from_options(&options)?;

        if body.len() > 1 {
            return Err(FilterError::invalid_filter(format!(
                "array filter '{name}' accepts at most one nested filter, got {}",
                body.len()
            )));
        }

        let element = match body.into_iter().next() {
            Some(decl) if !decl.names.is_empty() => {
                return Err(FilterError::invalid_filter(format!(
                    "attribute names in array block: {}",
                    decl.names.join(", ")
                )));
            }
            Some(decl) => Some(registry.build_named(name.clone(), inject_identity(&name, decl))?),
            None => None,
        };

        Ok(Self {
            name,
            options,
            element,
            converter,
        })
    }

    pub fn element(&self) -> Option<&dyn Filter> {
        self.element.as_deref()
    }

    fn process_items(&self, element: &dyn Filter, items: Vec<Value>, ctx: &ValidationContext) -> Outcome {
        let mut output = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let (value, error) = element.process(item.clone(), ctx).into_parts();
            if let Some(error) = error {
                return Outcome::failure(Value::Array(items), error.within(&format!("[{index}]")));
            }
            output.push(value);
        }

        Outcome::success(self.name.as_str(), Value::Array(output))
    }
}

impl Filter for ArrayFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        kind::ARRAY
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        match (value.as_array(), &self.element) {
            (Some(items), Some(element)) => items.iter().all(|item| element.matches(item)),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }

    fn process(&self, value: Value, ctx: &ValidationContext) -> Outcome {
        let value = match value {
            Value::Array(_) | Value::Nil => value,
            other => match self.convert(other).into_parts() {
                (value, None) => value,
                (value, Some(error)) => return Outcome::failure(value, error),
            },
        };

        match (value, &self.element) {
            (Value::Array(items), Some(element)) => self.process_items(element.as_ref(), items, ctx),
            (Value::Array(items), None) => Outcome::success(self.name.as_str(), Value::Array(items)),
            (Value::Nil, _) => match self.default_value() {
                Some(default) => Outcome::success(self.name.as_str(), default.clone()),
                None => Outcome::failure(Value::Nil, ValidationError::missing(self.name.as_str())),
            },
            (other, _) => {
                let error = ValidationError::invalid_type(self.name.as_str())
                    .with_expected(kind::ARRAY, other.kind());
                Outcome::failure(other, error)
            }
        }
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

    #[test]
    fn every_element_is_processed() {
        let ids = build(FilterDecl::array().named("ids").with_filter(FilterDecl::integer())).unwrap();
        let outcome = process_value(ids.as_ref(), json!([1, "2", 3.0]));
        assert_eq!(outcome.into_result(), Ok(Value::from(json!([1, 2, 3]))));
    }

    #[test]
    fn element_error_carries_index() {
        let ids = build(FilterDecl::array().named("ids").with_filter(FilterDecl::integer())).unwrap();
        let outcome = process_value(ids.as_ref(), json!([1, "two"]));
        let error = outcome.error().unwrap();
        assert_eq!(error.filter(), "ids");
        assert_eq!(error.kind(), ErrorKind::InvalidType);
        assert_eq!(error.path(), Some("[1]"));
        assert_eq!(outcome.value(), &Value::from(json!([1, "two"])));
    }

    #[test]
    fn nested_paths_compose() {
        let people = build(
            FilterDecl::array()
                .named("people")
                .with_filter(FilterDecl::hash().with_filter(FilterDecl::string().named("name"))),
        )
        .unwrap();
        let outcome = process_value(people.as_ref(), json!([{"name": "a"}, {}]));
        assert_eq!(outcome.error().and_then(ValidationError::path), Some("[1].name"));
    }

    #[test]
    fn untyped_array_passes_through() {
        let any = build(FilterDecl::array().named("any")).unwrap();
        assert!(any.matches(&Value::from(json!([1, "x"]))));
        assert!(!any.matches(&Value::from(json!({}))));
        assert!(process_value(any.as_ref(), json!([null])).is_success());
    }

    #[test]
    fn declaration_errors() {
        let named = build(FilterDecl::array().named("a").with_filter(FilterDecl::string().named("x")));
        assert_eq!(
            named.unwrap_err(),
            FilterError::InvalidFilter("attribute names in array block: x".into())
        );

        let two = build(
            FilterDecl::array()
                .named("a")
                .with_filter(FilterDecl::string())
                .with_filter(FilterDecl::integer()),
        );
        assert!(matches!(two, Err(FilterError::InvalidFilter(_))));
    }

    #[test]
    fn converter_wraps_single_values() {
        let tags = build(
            FilterDecl::array()
                .named("tags")
                .configure(|o| o.with_converter_fn(|value| Ok(Value::Array(vec![value.clone()]))))
                .with_filter(FilterDecl::string()),
        )
        .unwrap();
        assert_eq!(process_value(tags.as_ref(), "a").into_result(), Ok(Value::from(json!(["a"]))));
        assert_eq!(process_value(tags.as_ref(), json!(["b"])).into_result(), Ok(Value::from(json!(["b"]))));
        assert!(!tags.matches(&Value::from("a")));

        let invalid = build(FilterDecl::array().named("a").configure(|o| o.with_converter("explode")));
        assert!(matches!(invalid, Err(FilterError::InvalidConverter(_))));
    }

    #[test]
    fn element_objects_get_a_class() {
        let accounts = build(FilterDecl::array().named("accounts").with_filter(FilterDecl::object())).unwrap();
        let element = format!("{:?}", accounts);
        assert!(element.contains("Account"));
    }
}
