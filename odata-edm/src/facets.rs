//! Per-property constraints and defaults.

/// Constraints and defaults attached to a property by the model.
///
/// All fields are optional; an absent field means "unconstrained". Only
/// `default_value` participates in default merging; `max_length` is enforced
/// during scalar conversion for `Edm.String` and `Edm.Binary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    nullable: Option<bool>,
    default_value: Option<String>,
    max_length: Option<u32>,
}

impl Facets {
    /// Create an empty facet set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare whether the property accepts the wire null marker.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Declare the default literal used when the property is absent from the
    /// wire data and the caller opts into default merging.
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Declare the maximum length (characters for strings, bytes for binary).
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Nullability declared by the model, if any.
    pub fn nullable(&self) -> Option<bool> {
        self.nullable
    }

    /// Default literal declared by the model, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Maximum length declared by the model, if any.
    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }
}
