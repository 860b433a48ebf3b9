//! Optional host-side type mappings for scalar conversion.

use std::collections::BTreeMap;

/// Host-side conversion target for a scalar property.
///
/// Absent a target, conversion produces the type's own default
/// representation ([`crate::Value`] variant matching the declared type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Widen any integer type to `i64`.
    Int64,
    /// Widen any numeric type to `f64`.
    Double,
    /// Keep the raw literal as a string.
    Text,
}

/// One node of the caller-supplied type-mapping tree.
///
/// A node holds entries keyed by property name: a [`Target`] for scalar
/// properties, a nested node for complex ones. Lookups are total — a missing
/// entry behaves like an empty node, so recursion driven by the tree never
/// needs a null check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMapping {
    entries: BTreeMap<String, MappingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MappingEntry {
    Target(Target),
    Nested(TypeMapping),
}

static EMPTY: TypeMapping = TypeMapping {
    entries: BTreeMap::new(),
};

impl TypeMapping {
    /// Create an empty mapping node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion target for the named scalar property.
    pub fn with_target(mut self, name: impl Into<String>, target: Target) -> Self {
        self.entries.insert(name.into(), MappingEntry::Target(target));
        self
    }

    /// Register a nested node for the named complex property.
    pub fn with_child(mut self, name: impl Into<String>, child: TypeMapping) -> Self {
        self.entries.insert(name.into(), MappingEntry::Nested(child));
        self
    }

    /// The conversion target registered for `name`, if any.
    pub fn target_for(&self, name: &str) -> Option<Target> {
        match self.entries.get(name) {
            Some(MappingEntry::Target(target)) => Some(*target),
            _ => None,
        }
    }

    /// The nested node registered for `name`.
    ///
    /// Total: yields a shared empty node when no entry exists (or the entry
    /// is a scalar target).
    pub fn child(&self, name: &str) -> &TypeMapping {
        match self.entries.get(name) {
            Some(MappingEntry::Nested(child)) => child,
            _ => &EMPTY,
        }
    }

    /// Returns true when no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
