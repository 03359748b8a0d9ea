//! Human-readable formatting for Value.
//!
//! Strings are quoted so `"1"` and `1` stay distinguishable in error details.

use crate::Value;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{b}"),

            Value::Integer(i) => write!(f, "{i}"),

            Value::Float(fl) => {
                if fl.is_nan() {
                    write!(f, "NaN")
                } else if fl.is_infinite() {
                    write!(f, "{}Infinity", if fl.is_sign_positive() { "+" } else { "-" })
                } else {
                    write!(f, "{fl:?}")
                }
            }

            Value::String(s) => write!(f, "{s:?}"),

            Value::Date(d) => write!(f, "{d}"),

            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }

            Value::Hash(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }

            Value::Object(object) => write!(f, "#<{}>", object.class()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Object, Value};

    #[test]
    fn display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(
            Value::hash([("k", Value::array([1, 2]))]).to_string(),
            "{k: [1, 2]}"
        );
        assert_eq!(Value::from(Object::new("Account")).to_string(), "#<Account>");
    }
}
