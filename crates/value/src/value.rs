use crate::{Object, ValueKind};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// String-keyed hash preserving insertion order.
pub type Hash = IndexMap<String, Value>;

/// A raw, untyped input value.
///
/// `Nil` stands for an absent value. Equality is structural and never coerces
/// between kinds: `Integer(1)` and `Float(1.0)` are different values. Two
/// hashes are equal when they hold the same entries, whatever their order.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value
    #[default]
    Nil,

    /// Boolean value
    Bool(bool),

    /// Integer number
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// Ordered list of values
    Array(Vec<Value>),

    /// String-keyed hash
    Hash(Hash),

    /// Opaque host object
    Object(Object),
}

impl Value {
    /// Returns the kind of this value.
    pub const fn kind(&self) -> ValueKind {
        ValueKind::from_value(self)
    }

    /// True for the absent value.
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_hash(&self) -> Option<&Hash> {
        match self {
            Self::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Looks up a key when this value is a hash.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_hash().and_then(|hash| hash.get(key))
    }

    /// Builds a hash value from key/value pairs.
    pub fn hash<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Hash(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<IndexMap<_, _>>(),
        )
    }

    /// Builds an array value.
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}
