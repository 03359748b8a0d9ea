//! Core filter types and traits
//!
//! This module contains the building blocks every filter is made of:
//!
//! - **Trait**: [`Filter`] and the shared [`standard_cast`]
//! - **Outcome**: [`Outcome`], the value-plus-optional-error result of processing
//! - **Errors**: [`ValidationError`] (data) and [`FilterError`] (construction)
//! - **Configuration**: [`FilterOptions`], [`ConverterRef`], [`Converter`]
//! - **Context**: [`ValidationContext`], forwarded untouched to nested filters
//!
//! # Failure model
//!
//! Rejected input never panics and never becomes an `Err` from `process`: it
//! is an [`Outcome`] carrying a [`ValidationError`]. Malformed specifications
//! fail early, when filters are built, with a [`FilterError`].

pub mod context;
pub mod converter;
pub mod error;
pub mod naming;
pub mod options;
pub mod outcome;
pub mod traits;

pub use context::{ValidationContext, ValidationContextBuilder};
pub use converter::{Converter, ConverterFn, ConverterRef, Method, convert_with};
pub use error::{ConversionError, ErrorKind, FilterError, ValidationError};
pub use naming::derive_class_name;
pub use options::FilterOptions;
pub use outcome::Outcome;
pub use traits::{Filter, standard_cast};

use strainer_value::Value;

// ============================================================================
// UTILITIES
// ============================================================================

/// Processes a value with an empty context.
///
/// This is a convenience function for one-off processing.
///
/// # Examples
///
/// ```rust
/// use strainer_filter::foundation::process_value;
/// use strainer_filter::FilterRegistry;
/// use strainer_filter::declare::FilterDecl;
///
/// let registry = FilterRegistry::default();
/// let status = registry
///     .build(FilterDecl::new("value").named("status").with_options(
///         strainer_filter::foundation::FilterOptions::new().with_eq("open"),
///     ))
///     .unwrap();
/// assert!(process_value(status.as_ref(), "open").is_success());
/// ```
pub fn process_value(filter: &dyn Filter, value: impl Into<Value>) -> Outcome {
    filter.process(value.into(), &ValidationContext::new())
}

/// A filter construction result.
pub type FilterResult<T> = Result<T, FilterError>;
