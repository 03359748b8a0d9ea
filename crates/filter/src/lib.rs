//! # strainer-filter
//!
//! Declarative value filtering and coercion.
//!
//! A filter specification is declared once, as data ([`declare::FilterDecl`])
//! built in code or loaded from JSON, and turned into filters by a
//! [`FilterRegistry`]. Each filter then takes a raw, untyped
//! [`Value`](strainer_value::Value) and produces an
//! [`Outcome`](foundation::Outcome): the validated (and possibly coerced)
//! value, or that value together with a structured
//! [`ValidationError`](foundation::ValidationError).
//!
//! ## Quick Start
//!
//! ```rust
//! use strainer_filter::prelude::*;
//!
//! let registry = FilterRegistry::default();
//! let contact = registry
//!     .build(
//!         FilterDecl::union()
//!             .named("contact")
//!             .with_filter(FilterDecl::hash().with_filter(FilterDecl::string().named("email")))
//!             .with_filter(FilterDecl::array().with_filter(FilterDecl::integer())),
//!     )
//!     .unwrap();
//!
//! let outcome = process_value(contact.as_ref(), serde_json::json!({"email": "a@b.c"}));
//! assert!(outcome.is_success());
//!
//! let outcome = process_value(contact.as_ref(), serde_json::json!(["x"]));
//! assert_eq!(outcome.error().map(ValidationError::kind), Some(ErrorKind::InvalidType));
//! ```
//!
//! ## Failure model
//!
//! - Rejected input is data: an [`Outcome`](foundation::Outcome) carrying an
//!   error, never a panic.
//! - Malformed specifications fail while building, with a
//!   [`FilterError`](foundation::FilterError).
//!
//! ## Unions
//!
//! A union selects the first alternative whose `matches` accepts the value and
//! delegates to it; see [`filters::UnionFilter`]. Built filters hold no
//! per-call state and can be shared between threads.

pub mod declare;
pub mod filters;
pub mod foundation;
pub mod prelude;
pub mod registry;

pub use registry::FilterRegistry;
