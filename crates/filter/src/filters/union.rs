//! Union filter: ordered alternatives, first match owns the value.
//!
//! Selection is match-then-delegate. [`UnionFilter::select`] checks each
//! alternative's [`Filter::matches`] in declaration order and returns the
//! first that accepts the value; `process` then hands the value to that one
//! alternative and returns its outcome verbatim. Exactly one alternative ever
//! runs its full `process` (and therefore its converter) per call.
//!
//! The selected alternative is a return value, never instance state, so a
//! built union can be shared between threads and re-entered freely.
//!
//! A `converter` on the union itself runs only for a present value that no
//! alternative matches; selection is then retried on the converted value.

use std::fmt;

use indexmap::IndexMap;
use strainer_value::Value;
use tracing::trace;

use crate::declare::FilterDecl;
use crate::foundation::{
    convert_with, derive_class_name, Converter, Filter, FilterError, FilterOptions, FilterResult,
    Outcome, ValidationContext, ValidationError,
};
use crate::registry::{kind, FilterRegistry};

// ============================================================================
// IDENTITY INJECTION
// ============================================================================

/// Which identity option a nested kind receives from its owner's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentityOption {
    Class,
    From,
}

const IDENTITY_OPTIONS: &[(&str, IdentityOption)] = &[
    (kind::OBJECT, IdentityOption::Class),
    (kind::RECORD, IdentityOption::Class),
    (kind::INTERFACE, IdentityOption::From),
];

/// Fills in `class` / `from` on nested declarations that need an identity and
/// were not given one, using the class name derived from the owner's name.
pub(crate) fn inject_identity(owner: &str, mut decl: FilterDecl) -> FilterDecl {
    if owner.is_empty() {
        return decl;
    }

    let option = IDENTITY_OPTIONS
        .iter()
        .find(|(tag, _)| *tag == decl.kind)
        .map(|(_, option)| *option);

    let options = &mut decl.options;
    match option {
        Some(IdentityOption::Class) if options.class.is_none() => {
            options.class = Some(derive_class_name(owner));
        }
        Some(IdentityOption::From) if options.from.is_none() && options.methods.is_none() => {
            options.from = Some(derive_class_name(owner));
        }
        _ => {}
    }
    decl
}

// ============================================================================
// UNION FILTER
// ============================================================================

/// A composite filter over ordered, anonymous alternatives.
///
/// Alternatives are keyed `"0"`, `"1"`, ... in declaration order; the key is
/// also the alternative's name, so an error raised by a selected alternative
/// is attributed to `"0"`, `"1"`, ... while an input no alternative accepts
/// is attributed to the union.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::declare::FilterDecl;
/// use strainer_filter::foundation::process_value;
/// use strainer_filter::FilterRegistry;
///
/// let id = FilterRegistry::default()
///     .build(
///         FilterDecl::union()
///             .named("id")
///             .with_filter(FilterDecl::integer())
///             .with_filter(FilterDecl::string()),
///     )
///     .unwrap();
///
/// assert_eq!(process_value(id.as_ref(), 123).filter(), "0");
/// assert_eq!(process_value(id.as_ref(), "foo").filter(), "1");
/// assert_eq!(process_value(id.as_ref(), 12.5).filter(), "id");
/// ```
pub struct UnionFilter {
    name: String,
    options: FilterOptions,
    filters: IndexMap<String, Box<dyn Filter>>,
    converter: Option<Converter>,
}

impl UnionFilter {
    /// Builds a union from its declared body.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidFilter`] when the body is empty or an
    /// alternative carries attribute names, and
    /// [`FilterError::InvalidConverter`] for a converter that cannot be
    /// invoked. Any error raised while building an alternative is propagated.
    pub fn build(
        registry: &FilterRegistry,
        name: impl Into<String>,
        options: FilterOptions,
        body: Vec<FilterDecl>,
    ) -> FilterResult<Self> {
        let name = name.into();
        let converter = Converter::from_options(&options)?;

        if body.is_empty() {
            return Err(FilterError::invalid_filter(format!(
                "union filter '{name}' requires at least one nested filter"
            )));
        }
        if let Some(named) = body.iter().find(|decl| !decl.names.is_empty()) {
            return Err(FilterError::invalid_filter(format!(
                "attribute names in union block: {}",
                named.names.join(", ")
            )));
        }

        let mut filters = IndexMap::with_capacity(body.len());
        for (index, decl) in body.into_iter().enumerate() {
            let key = index.to_string();
            let filter = registry.build_named(key.clone(), inject_identity(&name, decl))?;
            filters.insert(key, filter);
        }

        Ok(Self {
            name,
            options,
            filters,
            converter,
        })
    }

    /// Builds a union from already constructed alternatives, keyed in order.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidConverter`] for a converter that cannot be
    /// invoked.
    pub fn from_filters(
        name: impl Into<String>,
        options: FilterOptions,
        alternatives: impl IntoIterator<Item = Box<dyn Filter>>,
    ) -> FilterResult<Self> {
        let filters = alternatives
            .into_iter()
            .enumerate()
            .map(|(index, filter)| (index.to_string(), filter))
            .collect();

        Ok(Self {
            name: name.into(),
            converter: Converter::from_options(&options)?,
            options,
            filters,
        })
    }

    /// The alternatives in trial order.
    pub fn filters(&self) -> &IndexMap<String, Box<dyn Filter>> {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the first alternative (in declaration order) that matches.
    pub fn select(&self, value: &Value) -> Option<(&str, &dyn Filter)> {
        let selected = self
            .filters
            .iter()
            .find(|(_, filter)| filter.matches(value))
            .map(|(key, filter)| (key.as_str(), &**filter));

        trace!(
            union = %self.name,
            kind = %value.kind(),
            selected = selected.map(|(key, _)| key),
            "union alternative selection"
        );
        selected
    }

    fn expected(&self) -> String {
        let kinds: Vec<&str> = self.filters.values().map(|filter| filter.kind()).collect();
        format!("one of {}", kinds.join(", "))
    }
}

impl Filter for UnionFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        kind::UNION
    }

    fn options(&self) -> &FilterOptions {
        &self.options
    }

    fn matches(&self, value: &Value) -> bool {
        self.select(value).is_some()
    }

    fn convert(&self, value: Value) -> Outcome {
        convert_with(self.converter.as_ref(), &self.name, value)
    }

    fn cast(&self, value: Value, _ctx: &ValidationContext) -> Outcome {
        if self.converter.is_none() || value.is_nil() || self.matches(&value) {
            return Outcome::success(self.name.as_str(), value);
        }
        self.convert(value)
    }

    fn process(&self, value: Value, ctx: &ValidationContext) -> Outcome {
        let absent = value.is_nil();

        let (value, error) = self.cast(value, ctx).into_parts();
        if let Some(error) = error {
            return Outcome::failure(value, error);
        }

        if let Some((_, filter)) = self.select(&value) {
            return filter.process(value, ctx);
        }

        if absent
            && let Some(default) = self.default_value()
        {
            return Outcome::success(self.name.as_str(), default.clone());
        }

        let error = ValidationError::invalid_type(self.name.as_str())
            .with_expected(&self.expected(), value.kind());
        Outcome::failure(value, error)
    }
}

impl fmt::Debug for UnionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionFilter")
            .field("name", &self.name)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}
