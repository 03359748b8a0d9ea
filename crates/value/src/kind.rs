//! Value kinds.
//!
//! `ValueKind` is a lightweight classification of a [`Value`], used by filters
//! for strict shape checks and for the detail text of validation errors.

use crate::Value;
use core::fmt::{Display, Formatter};

/// Represents the kind/type of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Nil,
    Boolean,
    Integer,
    Float,
    String,
    Date,
    Array,
    Hash,
    Object,
}

impl ValueKind {
    /// Get the kind from a Value
    pub const fn from_value(value: &Value) -> Self {
        match value {
            Value::Nil => Self::Nil,
            Value::Bool(_) => Self::Boolean,
            Value::Integer(_) => Self::Integer,
            Value::Float(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Date(_) => Self::Date,
            Value::Array(_) => Self::Array,
            Value::Hash(_) => Self::Hash,
            Value::Object(_) => Self::Object,
        }
    }

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Check if this kind is a collection
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array | Self::Hash)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Hash => "hash",
            Self::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Nil, ValueKind::Nil)]
    #[case(Value::from(true), ValueKind::Boolean)]
    #[case(Value::from(1), ValueKind::Integer)]
    #[case(Value::from(1.5), ValueKind::Float)]
    #[case(Value::from("x"), ValueKind::String)]
    #[case(Value::Array(vec![]), ValueKind::Array)]
    #[case(Value::Hash(crate::Hash::new()), ValueKind::Hash)]
    fn kind_of_value(#[case] value: Value, #[case] expected: ValueKind) {
        assert_eq!(ValueKind::from_value(&value), expected);
    }

    #[test]
    fn classification() {
        assert!(ValueKind::Float.is_numeric());
        assert!(!ValueKind::String.is_numeric());
        assert!(ValueKind::Hash.is_collection());
        assert_eq!(ValueKind::Date.to_string(), "date");
    }
}
