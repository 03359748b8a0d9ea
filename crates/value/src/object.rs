//! Opaque host objects.

use crate::value::Hash;
use crate::Value;

/// A host object carried through a filter as an opaque value.
///
/// Filters never look inside an object beyond its identity: the class it was
/// built from, the classes and interfaces it descends from, and the methods it
/// responds to. `fields` exists so converters and finders can build objects
/// from plain data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Object {
    class: String,
    ancestors: Vec<String>,
    methods: Vec<String>,
    fields: Hash,
}

impl Object {
    /// Creates an object of the given class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    /// Adds an ancestor class or included interface.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_ancestor(mut self, ancestor: impl Into<String>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    /// Adds a method the object responds to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    /// Sets a named field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The class this object was built from.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// True when `name` is the object's class or one of its ancestors.
    pub fn is_a(&self, name: &str) -> bool {
        self.class == name || self.ancestors.iter().any(|a| a == name)
    }

    /// True when the object responds to `method`.
    pub fn responds_to(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// Looks up a field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_checks() {
        let account = Object::new("Account")
            .with_ancestor("Record")
            .with_method("email")
            .with_field("id", 7);

        assert!(account.is_a("Account"));
        assert!(account.is_a("Record"));
        assert!(!account.is_a("User"));
        assert!(account.responds_to("email"));
        assert!(!account.responds_to("name"));
        assert_eq!(account.field("id"), Some(&Value::Integer(7)));
        assert_eq!(account.class(), "Account");
    }
}
