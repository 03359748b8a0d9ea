//! The filter contract
//!
//! This module defines the trait every filter implements, together with the
//! standard cast algorithm most leaf filters share.

use std::fmt;

use strainer_value::Value;

use crate::foundation::{FilterOptions, Outcome, ValidationContext, ValidationError};

// ============================================================================
// CORE FILTER TRAIT
// ============================================================================

/// A named, configured validator/coercer for one value slot.
///
/// Filters are built once from a declaration and then only read: every
/// method takes `&self`, so a built specification can be shared across
/// threads and reused for any number of `process` calls.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::foundation::{Filter, FilterOptions, Outcome, ValidationContext};
/// use strainer_value::Value;
///
/// #[derive(Debug)]
/// struct Even {
///     options: FilterOptions,
/// }
///
/// impl Filter for Even {
///     fn name(&self) -> &str { "even" }
///     fn kind(&self) -> &str { "even" }
///     fn options(&self) -> &FilterOptions { &self.options }
///     fn matches(&self, value: &Value) -> bool {
///         value.as_integer().is_some_and(|i| i % 2 == 0)
///     }
/// }
///
/// let even = Even { options: FilterOptions::new() };
/// let ctx = ValidationContext::new();
/// assert!(even.process(Value::from(4), &ctx).is_success());
/// assert!(even.process(Value::from(3), &ctx).has_error());
/// ```
pub trait Filter: fmt::Debug + Send + Sync {
    /// Name used for error attribution.
    fn name(&self) -> &str;

    /// Kind tag this filter was registered under (`value`, `union`, ...).
    fn kind(&self) -> &str;

    /// The immutable options the filter was built with.
    fn options(&self) -> &FilterOptions;

    /// Cheap acceptance check on an already-cast value.
    ///
    /// Must be total: a value whose shape the filter cannot inspect is a
    /// non-match, never a panic.
    fn matches(&self, value: &Value) -> bool;

    /// Applies the filter's conversion. Identity unless overridden.
    fn convert(&self, value: Value) -> Outcome {
        Outcome::success(self.name(), value)
    }

    /// Coerces a raw value before acceptance.
    ///
    /// Defaults to [`standard_cast`].
    fn cast(&self, value: Value, _ctx: &ValidationContext) -> Outcome {
        standard_cast(self, value)
    }

    /// Processes a raw value into an outcome. `ctx` is forwarded unchanged
    /// to nested filters.
    fn process(&self, value: Value, ctx: &ValidationContext) -> Outcome {
        self.cast(value, ctx)
    }

    /// The configured default, if any. `Some(&Value::Nil)` is a nil default.
    fn default_value(&self) -> Option<&Value> {
        self.options().default.as_ref()
    }

    fn has_default(&self) -> bool {
        self.default_value().is_some()
    }
}

// ============================================================================
// STANDARD CAST
// ============================================================================

/// The cast shared by leaf filters:
///
/// 1. a value the filter already matches is accepted as is;
/// 2. an absent value takes the default, or fails with `missing`;
/// 3. anything else goes through [`Filter::convert`] and is accepted only if
///    the converted value matches, otherwise `invalid_type`.
pub fn standard_cast<F: Filter + ?Sized>(filter: &F, value: Value) -> Outcome {
    if filter.matches(&value) {
        return Outcome::success(filter.name(), value);
    }

    if value.is_nil() {
        return match filter.default_value() {
            Some(default) => Outcome::success(filter.name(), default.clone()),
            None => Outcome::failure(value, ValidationError::missing(filter.name())),
        };
    }

    let (value, error) = filter.convert(value).into_parts();
    if let Some(error) = error {
        return Outcome::failure(value, error);
    }

    if filter.matches(&value) {
        Outcome::success(filter.name(), value)
    } else {
        let error = ValidationError::invalid_type(filter.name()).with_expected(filter.kind(), value.kind());
        Outcome::failure(value, error)
    }
}

// ============================================================================
// TESTS
// ============================================================================
