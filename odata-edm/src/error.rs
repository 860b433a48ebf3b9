//! Error type for scalar conversion.

use std::fmt;

use crate::mapping::Target;

/// Error produced when a literal cannot be converted to a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The literal does not match the type's textual grammar.
    InvalidLiteral {
        /// Qualified name of the declared type (`Edm.*`).
        type_name: &'static str,
        /// The offending literal.
        literal: String,
    },
    /// The literal is well-formed but violates a declared facet.
    FacetViolation {
        /// Qualified name of the declared type (`Edm.*`).
        type_name: &'static str,
        /// The offending literal.
        literal: String,
        /// Human-readable description of the violated constraint.
        constraint: String,
    },
    /// The conversion target does not apply to the declared type.
    UnsupportedTarget {
        /// Qualified name of the declared type (`Edm.*`).
        type_name: &'static str,
        /// The requested target.
        target: Target,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidLiteral { type_name, literal } => {
                write!(f, "'{literal}' is not a valid {type_name} literal")
            }
            ConvertError::FacetViolation {
                type_name,
                literal,
                constraint,
            } => {
                write!(f, "'{literal}' violates {constraint} for {type_name}")
            }
            ConvertError::UnsupportedTarget { type_name, target } => {
                write!(f, "{type_name} cannot be converted to target {target:?}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}
