//! Filter registry
//!
//! Maps kind tags to constructors and turns [`FilterDecl`]s into filters.
//! The registry starts with the built-in kinds; collaborators add their own
//! with [`FilterRegistry::register`] before building specifications.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::declare::FilterDecl;
use crate::filters::{
    ArrayFilter, HashFilter, InterfaceFilter, ObjectFilter, ScalarFilter, ScalarKind, UnionFilter,
    ValueFilter,
};
use crate::foundation::{Filter, FilterError, FilterOptions, FilterResult};

/// Built-in kind tags.
pub mod kind {
    pub const VALUE: &str = "value";
    pub const UNION: &str = "union";
    pub const INTEGER: &str = "integer";
    pub const FLOAT: &str = "float";
    pub const STRING: &str = "string";
    pub const BOOLEAN: &str = "boolean";
    pub const DATE: &str = "date";
    pub const HASH: &str = "hash";
    pub const ARRAY: &str = "array";
    pub const OBJECT: &str = "object";
    pub const RECORD: &str = "record";
    pub const INTERFACE: &str = "interface";
}

/// Constructor contract: `(registry, name, options, body) -> filter`.
///
/// The registry is passed so composite kinds can build their bodies.
pub type FilterConstructor = dyn Fn(&FilterRegistry, String, FilterOptions, Vec<FilterDecl>) -> FilterResult<Box<dyn Filter>>
    + Send
    + Sync;

/// Closed mapping from kind tag to constructor.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::FilterRegistry;
/// use strainer_filter::declare::FilterDecl;
/// use strainer_filter::foundation::process_value;
///
/// let registry = FilterRegistry::default();
/// let id = registry
///     .build(FilterDecl::union().named("id").with_filter(FilterDecl::integer()).with_filter(FilterDecl::string()))
///     .unwrap();
/// assert!(process_value(id.as_ref(), 7).is_success());
/// assert!(process_value(id.as_ref(), true).has_error());
/// ```
#[derive(Clone)]
pub struct FilterRegistry {
    constructors: HashMap<String, Arc<FilterConstructor>>,
}

impl FilterRegistry {
    /// A registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry holding the built-in kinds.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry
            .register(kind::VALUE, |_, name, options, body| {
                no_body(kind::VALUE, &body)?;
                Ok(Box::new(ValueFilter::new(name, options)?))
            })
            .register(kind::UNION, |registry, name, options, body| {
                Ok(Box::new(UnionFilter::build(registry, name, options, body)?))
            })
            .register(kind::HASH, |registry, name, options, body| {
                Ok(Box::new(HashFilter::build(registry, name, options, body)?))
            })
            .register(kind::ARRAY, |registry, name, options, body| {
                Ok(Box::new(ArrayFilter::build(registry, name, options, body)?))
            })
            .register(kind::OBJECT, |_, name, options, body| {
                no_body(kind::OBJECT, &body)?;
                Ok(Box::new(ObjectFilter::object(name, options)?))
            })
            .register(kind::RECORD, |_, name, options, body| {
                no_body(kind::RECORD, &body)?;
                Ok(Box::new(ObjectFilter::record(name, options)?))
            })
            .register(kind::INTERFACE, |_, name, options, body| {
                no_body(kind::INTERFACE, &body)?;
                Ok(Box::new(InterfaceFilter::new(name, options)?))
            });

        for scalar in ScalarKind::ALL {
            registry.register(scalar.tag(), move |_, name, options, body| {
                no_body(scalar.tag(), &body)?;
                Ok(Box::new(ScalarFilter::new(scalar, name, options)?))
            });
        }

        registry
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&FilterRegistry, String, FilterOptions, Vec<FilterDecl>) -> FilterResult<Box<dyn Filter>>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(kind.into(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kind tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Builds a single filter. The declaration may carry at most one name;
    /// without one the filter is anonymous (empty name).
    pub fn build(&self, decl: FilterDecl) -> FilterResult<Box<dyn Filter>> {
        if decl.names.len() > 1 {
            return Err(FilterError::invalid_filter(format!(
                "expected at most one attribute name, got {}",
                decl.names.len()
            )));
        }
        let name = decl.names.first().cloned().unwrap_or_default();
        self.build_named(name, decl)
    }

    /// Builds a filter under an explicit name, ignoring `decl.names`.
    pub fn build_named(&self, name: impl Into<String>, decl: FilterDecl) -> FilterResult<Box<dyn Filter>> {
        let name = name.into();
        let constructor = self
            .constructors
            .get(&decl.kind)
            .ok_or_else(|| FilterError::UnknownKind(decl.kind.clone()))?;

        debug!(kind = %decl.kind, name = %name, nested = decl.filters.len(), "building filter");
        constructor(self, name, decl.options, decl.filters)
    }

    /// Builds one filter per declared name, sharing options and body.
    pub fn build_each(&self, decl: FilterDecl) -> FilterResult<Vec<Box<dyn Filter>>> {
        decl.names
            .iter()
            .map(|name| self.build_named(name.clone(), decl.clone()))
            .collect()
    }

    /// Builds a single filter from a JSON declaration.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_json(&self, declaration: serde_json::Value) -> FilterResult<Box<dyn Filter>> {
        let decl: FilterDecl = serde_json::from_value(declaration)
            .map_err(|e| FilterError::invalid_filter(format!("malformed declaration: {e}")))?;
        self.build(decl)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Rejects a body on kinds that take none.
pub(crate) fn no_body(kind: &str, body: &[FilterDecl]) -> FilterResult<()> {
    if body.is_empty() {
        Ok(())
    } else {
        Err(FilterError::invalid_filter(format!(
            "{kind} filter does not take nested filters"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{process_value, Outcome, ValidationContext};
    use serde_json::json;
    use strainer_value::Value;

    #[test]
    fn builtin_kinds() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.kinds(),
            [
                "array", "boolean", "date", "float", "hash", "integer", "interface", "object",
                "record", "string", "union", "value"
            ]
        );
        assert!(FilterRegistry::empty().kinds().is_empty());
    }

    #[test]
    fn unknown_kind() {
        let error = FilterRegistry::default().build(FilterDecl::new("bogus")).unwrap_err();
        assert_eq!(error, FilterError::UnknownKind("bogus".into()));
    }

    #[test]
    fn single_build_rejects_multiple_names() {
        let decl = FilterDecl::string().named("a").named("b");
        let registry = FilterRegistry::default();
        assert!(matches!(registry.build(decl.clone()), Err(FilterError::InvalidFilter(_))));

        let built = registry.build_each(decl).unwrap();
        let names: Vec<&str> = built.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn leaf_kinds_reject_bodies() {
        let decl = FilterDecl::integer().with_filter(FilterDecl::string());
        let error = FilterRegistry::default().build(decl).unwrap_err();
        assert_eq!(
            error,
            FilterError::InvalidFilter("integer filter does not take nested filters".into())
        );
    }

    #[test]
    fn from_json() {
        let registry = FilterRegistry::default();
        let filter = registry
            .from_json(json!({"kind": "value", "names": ["action"], "options": {"eq": "update"}}))
            .unwrap();
        assert_eq!(filter.name(), "action");
        assert_eq!(filter.kind(), "value");
        assert!(process_value(filter.as_ref(), "update").is_success());

        let error = registry.from_json(json!({"names": ["x"]})).unwrap_err();
        assert!(matches!(error, FilterError::InvalidFilter(_)));
    }

    #[derive(Debug)]
    struct Anything {
        name: String,
        options: FilterOptions,
    }

    impl Filter for Anything {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> &str {
            "anything"
        }

        fn options(&self) -> &FilterOptions {
            &self.options
        }

        fn matches(&self, _value: &Value) -> bool {
            true
        }
    }

    #[test]
    fn collaborator_kinds() {
        let mut registry = FilterRegistry::default();
        registry.register("anything", |_, name, options, _| Ok(Box::new(Anything { name, options })));
        assert!(registry.contains("anything"));

        let filter = registry
            .build(FilterDecl::union().named("x").with_filter(FilterDecl::new("anything")))
            .unwrap();
        let outcome: Outcome = filter.process(Value::from(1.5), &ValidationContext::new());
        assert_eq!(outcome.filter(), "0");
        assert!(format!("{registry:?}").contains("anything"));
    }
}
