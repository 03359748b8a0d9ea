//! Filter declarations.
//!
//! A [`FilterDecl`] is the declarative form of a filter specification: a kind
//! tag, the attribute names it applies to, its options, and the nested
//! declarations of its body. Declarations are plain data; the
//! [`FilterRegistry`](crate::FilterRegistry) turns them into filters.
//!
//! They can be written in code:
//!
//! ```rust
//! use strainer_filter::declare::FilterDecl;
//!
//! let contact = FilterDecl::union()
//!     .named("contact")
//!     .with_filter(FilterDecl::integer())
//!     .with_filter(FilterDecl::hash().with_filter(FilterDecl::string().named("email")));
//! assert_eq!(contact.filters.len(), 2);
//! ```
//!
//! or loaded from JSON:
//!
//! ```rust
//! use strainer_filter::declare::FilterDecl;
//!
//! let contact: FilterDecl = serde_json::from_value(serde_json::json!({
//!     "kind": "union",
//!     "names": ["contact"],
//!     "filters": [{"kind": "integer"}, {"kind": "string"}]
//! })).unwrap();
//! assert_eq!(contact.kind, "union");
//! ```

use serde::Deserialize;
use strainer_value::Value;

use crate::foundation::FilterOptions;
use crate::registry::kind;

/// Declaration of one filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterDecl {
    /// Registered kind tag.
    pub kind: String,

    /// Attribute names. Empty for anonymous alternatives and elements.
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub options: FilterOptions,

    /// Nested declarations (the body of a union, hash or array).
    #[serde(default)]
    pub filters: Vec<FilterDecl>,
}

impl FilterDecl {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute name.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Edits the options in place.
    #[must_use = "builder methods must be chained or built"]
    pub fn configure(mut self, f: impl FnOnce(FilterOptions) -> FilterOptions) -> Self {
        self.options = f(std::mem::take(&mut self.options));
        self
    }

    /// Appends a nested declaration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_filter(mut self, filter: FilterDecl) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn union() -> Self {
        Self::new(kind::UNION)
    }

    /// A `value` declaration with its required `eq`.
    pub fn value(eq: impl Into<Value>) -> Self {
        Self::new(kind::VALUE).with_options(FilterOptions::new().with_eq(eq))
    }

    pub fn integer() -> Self {
        Self::new(kind::INTEGER)
    }

    pub fn float() -> Self {
        Self::new(kind::FLOAT)
    }

    pub fn string() -> Self {
        Self::new(kind::STRING)
    }

    pub fn boolean() -> Self {
        Self::new(kind::BOOLEAN)
    }

    pub fn date() -> Self {
        Self::new(kind::DATE)
    }

    pub fn hash() -> Self {
        Self::new(kind::HASH)
    }

    pub fn array() -> Self {
        Self::new(kind::ARRAY)
    }

    pub fn object() -> Self {
        Self::new(kind::OBJECT)
    }

    pub fn record() -> Self {
        Self::new(kind::RECORD)
    }

    pub fn interface() -> Self {
        Self::new(kind::INTERFACE)
    }
}
