//! Named-type registry.
//!
//! An explicit name-to-schema store passed to the constructor by reference,
//! rather than ambient process-global state. Population happens through
//! [`TypeRegistry::register`], [`TypeRegistry::extend`], or the disk loader;
//! validation only reads. Shared `&TypeRegistry` access makes concurrent
//! validation safe while mutation requires `&mut` exclusivity.

use indexmap::IndexMap;

use crate::schema::Schema;

/// Name → schema store for named-type reuse.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Schema>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named type, replacing any existing definition.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) {
        self.types.insert(name.into(), schema);
    }

    /// Bulk-loads named types from an in-memory mapping.
    pub fn extend<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        for (name, schema) in entries {
            self.register(name, schema);
        }
    }

    /// Looks up a named type.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
