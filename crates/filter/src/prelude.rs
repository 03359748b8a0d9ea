//! Prelude module for convenient imports
//!
//! ```rust
//! use strainer_filter::prelude::*;
//! ```

pub use crate::declare::FilterDecl;
pub use crate::filters::{
    ArrayFilter, HashFilter, InterfaceFilter, ObjectFilter, ScalarFilter, ScalarKind, UnionFilter,
    ValueFilter,
};
pub use crate::foundation::{
    ConversionError, ErrorKind, Filter, FilterError, FilterOptions, FilterResult, Outcome,
    ValidationContext, ValidationError, process_value,
};
pub use crate::registry::FilterRegistry;
pub use strainer_value::{Object, Value, ValueKind};
