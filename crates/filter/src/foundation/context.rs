//! Caller context forwarded through filter processing.
//!
//! Filters never read the context. It travels unchanged from the outermost
//! `process` call down to every nested filter so collaborator-defined filters
//! can reach data that lives outside the value itself (the other fields of
//! the object being validated, the current user, ...).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Typed key/value bag with an optional parent.
///
/// Lookups fall back to the parent when a key is not set locally.
#[derive(Default)]
pub struct ValidationContext {
    data: HashMap<String, Box<dyn Any + Send + Sync>>,
    parent: Option<Arc<ValidationContext>>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context that reads through to `parent`.
    pub fn with_parent(parent: Arc<ValidationContext>) -> Self {
        Self {
            data: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Stores a value under `key`, replacing any previous one.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Box::new(value));
    }

    /// Returns the value under `key` if it exists and has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        match self.data.get(key) {
            Some(value) => value.downcast_ref::<T>(),
            None => self.parent.as_deref().and_then(|p| p.get::<T>(key)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key) || self.parent.as_deref().is_some_and(|p| p.contains(key))
    }

    /// Number of locally stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ValidationContext")
            .field("keys", &keys)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Builder for [`ValidationContext`].
#[derive(Debug, Default)]
pub struct ValidationContextBuilder {
    context: ValidationContext,
}

impl ValidationContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.context.insert(key, value);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn parent(mut self, parent: Arc<ValidationContext>) -> Self {
        self.context.parent = Some(parent);
        self
    }

    pub fn build(self) -> ValidationContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get() {
        let mut ctx = ValidationContext::new();
        ctx.insert("key", 42usize);

        assert_eq!(ctx.get::<usize>("key"), Some(&42));
        assert_eq!(ctx.get::<String>("key"), None);
        assert_eq!(ctx.get::<usize>("missing"), None);
        assert!(ctx.contains("key"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn parent_lookup() {
        let parent = ValidationContextBuilder::new().with("tenant", "acme").build();
        let child = ValidationContextBuilder::new()
            .with("user", 7u32)
            .parent(Arc::new(parent))
            .build();

        assert_eq!(child.get::<&str>("tenant"), Some(&"acme"));
        assert_eq!(child.get::<u32>("user"), Some(&7));
        assert!(child.contains("tenant"));
        assert_eq!(child.len(), 1);
    }

    #[test]
    fn empty() {
        let ctx = ValidationContext::with_parent(Arc::new(ValidationContext::new()));
        assert!(ctx.is_empty());
        assert!(!ctx.contains("anything"));
        assert!(format!("{ctx:?}").contains("ValidationContext"));
    }
}
