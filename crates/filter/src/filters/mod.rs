//! Built-in filters
//!
//! - [`ValueFilter`]: exact match against a reference value
//! - [`UnionFilter`]: ordered alternatives, first match owns the value
//! - [`ScalarFilter`]: `integer`, `float`, `string`, `boolean`, `date`
//! - [`HashFilter`] and [`ArrayFilter`]: nested composites
//! - [`ObjectFilter`] and [`InterfaceFilter`]: host objects

pub mod array;
pub mod hash;
pub mod object;
pub mod scalar;
pub mod union;
pub mod value;

pub use array::ArrayFilter;
pub use hash::HashFilter;
pub use object::{InterfaceFilter, ObjectFilter};
pub use scalar::{DEFAULT_DATE_FORMAT, ScalarFilter, ScalarKind};
pub use union::UnionFilter;
pub use value::ValueFilter;
