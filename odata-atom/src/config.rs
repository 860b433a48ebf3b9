//! Caller-supplied configuration for read operations.

use std::collections::HashMap;

use odata_edm::TypeMapping;

/// Options governing one read call.
///
/// The feed decoder derives an *effective* configuration for its entries via
/// [`ReadProperties::init_from`] plus the namespace bindings found on the
/// feed boundary.
#[derive(Debug, Clone, Default)]
pub struct ReadProperties {
    merge_semantics: bool,
    type_mappings: TypeMapping,
    validated_prefixes: HashMap<String, String>,
}

impl ReadProperties {
    /// Create a default configuration: no merging, no type mappings, no
    /// pre-validated namespace bindings.
    pub fn init() -> Self {
        Self::default()
    }

    /// Create a configuration carrying over everything from `other`.
    pub fn init_from(other: &ReadProperties) -> Self {
        other.clone()
    }

    /// Opt into the default-merge pass for top-level property reads.
    pub fn with_merge_semantics(mut self, merge_semantics: bool) -> Self {
        self.merge_semantics = merge_semantics;
        self
    }

    /// Supply the host-side type-mapping tree.
    pub fn with_type_mappings(mut self, type_mappings: TypeMapping) -> Self {
        self.type_mappings = type_mappings;
        self
    }

    /// Record a namespace binding the caller has already validated.
    pub fn with_validated_prefix(
        mut self,
        prefix: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        self.validated_prefixes.insert(prefix.into(), uri.into());
        self
    }

    /// Record a set of validated namespace bindings, overriding earlier ones
    /// for the same prefix.
    pub fn with_validated_prefixes(
        mut self,
        bindings: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.validated_prefixes.extend(bindings);
        self
    }

    /// Whether the default-merge pass is applied to top-level reads.
    pub fn merge_semantics(&self) -> bool {
        self.merge_semantics
    }

    /// The host-side type-mapping tree.
    pub fn type_mappings(&self) -> &TypeMapping {
        &self.type_mappings
    }

    /// Namespace bindings validated so far: prefix → URI, default namespace
    /// keyed by the empty string.
    pub fn validated_prefixes(&self) -> &HashMap<String, String> {
        &self.validated_prefixes
    }
}
