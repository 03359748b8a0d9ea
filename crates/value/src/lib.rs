//! # strainer-value
//!
//! The dynamic value model consumed by the strainer filter engine.
//!
//! Raw input arrives untyped: a scalar, a date, a list, a string-keyed hash or
//! an opaque host object. [`Value`] captures all of these so filters can
//! inspect, coerce and compare them without knowing where they came from.
//!
//! ```rust
//! use strainer_value::{Value, ValueKind};
//!
//! let v = Value::from(serde_json::json!({"foo": "bar"}));
//! assert_eq!(v.kind(), ValueKind::Hash);
//! assert_eq!(v.get("foo"), Some(&Value::from("bar")));
//! ```

mod convert;
mod display;
mod kind;
mod object;
mod value;

pub use indexmap::IndexMap;
pub use kind::ValueKind;
pub use object::Object;
pub use value::{Hash, Value};
