//! Read-only property and entity schema views.

use crate::Facets;
use crate::SimpleType;
use crate::namespace;

/// Description of one named property: a scalar with a concrete simple type,
/// or a complex structure composed of further named properties.
///
/// Views are immutable once built; consumers only borrow them for the
/// duration of a single decode call.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    name: String,
    facets: Option<Facets>,
    kind: PropertyKind,
}

/// The two shapes a property can take.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// A scalar with a declared simple type.
    Simple(SimpleType),
    /// A nested structure with a declared complex type.
    Complex(ComplexType),
}

impl PropertyInfo {
    /// Describe a scalar property.
    pub fn simple(name: impl Into<String>, simple_type: SimpleType) -> Self {
        Self {
            name: name.into(),
            facets: None,
            kind: PropertyKind::Simple(simple_type),
        }
    }

    /// Describe a complex property.
    pub fn complex(name: impl Into<String>, complex_type: ComplexType) -> Self {
        Self {
            name: name.into(),
            facets: None,
            kind: PropertyKind::Complex(complex_type),
        }
    }

    /// Attach facets to this property.
    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }

    /// The property name, unique among its siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Facets declared for this property, if any.
    pub fn facets(&self) -> Option<&Facets> {
        self.facets.as_ref()
    }

    /// Whether this property is complex.
    pub fn is_complex(&self) -> bool {
        matches!(self.kind, PropertyKind::Complex(_))
    }

    /// The scalar/complex discriminant.
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// The declared simple type, for scalar properties.
    pub fn simple_type(&self) -> Option<SimpleType> {
        match &self.kind {
            PropertyKind::Simple(simple_type) => Some(*simple_type),
            PropertyKind::Complex(_) => None,
        }
    }

    /// The declared complex type, for complex properties.
    pub fn complex_type(&self) -> Option<&ComplexType> {
        match &self.kind {
            PropertyKind::Complex(complex_type) => Some(complex_type),
            PropertyKind::Simple(_) => None,
        }
    }
}

/// A complex type: a namespace-qualified name plus an ordered set of child
/// properties, each retrievable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexType {
    namespace: String,
    name: String,
    properties: Vec<PropertyInfo>,
}

impl ComplexType {
    /// Create a complex type with no properties yet.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Append a child property. Order is preserved.
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// The type's namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The type's local name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace-qualified type name (`Namespace.Name`), as it appears
    /// in the wire `m:type` attribute.
    pub fn qualified_name(&self) -> String {
        format!("{}{}{}", self.namespace, namespace::DELIMITER, self.name)
    }

    /// The declared child properties, in declaration order.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Look up a child property by name. An unknown name is "not found",
    /// not an error.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

/// The schema view of one entry: the entity's name and its properties.
///
/// Shares the lookup contract of [`ComplexType`]; the entry decoder resolves
/// each wire property against this view.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    name: String,
    properties: Vec<PropertyInfo>,
}

impl EntityInfo {
    /// Create an entity view with no properties yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Append a property. Order is preserved.
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// The entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared properties, in declaration order.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }
}
