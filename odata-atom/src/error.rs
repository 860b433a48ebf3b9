//! Error types for Atom/XML consumption.

use std::error::Error;
use std::fmt::{self, Display};

use odata_edm::ConvertError;

use crate::cursor::XmlError;

/// Error type for Atom/XML consumption.
///
/// Every error aborts the current decode call immediately; there is no
/// partial result and no internal retry. The wrapped [`ReadErrorKind`]
/// carries enough detail (expected/actual names, offending text) to build a
/// diagnostic without re-parsing the input.
#[derive(Debug)]
pub struct ReadError {
    kind: ReadErrorKind,
}

impl ReadError {
    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &ReadErrorKind {
        &self.kind
    }

    /// Create a new error with the given kind.
    pub(crate) fn new(kind: impl Into<ReadErrorKind>) -> Self {
        ReadError { kind: kind.into() }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = &self.kind;
        write!(f, "{kind}")
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ReadErrorKind::MalformedStream(e) => Some(e),
            ReadErrorKind::Conversion { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl<K: Into<ReadErrorKind>> From<K> for ReadError {
    fn from(value: K) -> Self {
        ReadError::new(value)
    }
}

/// Detailed classification of consumption errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum ReadErrorKind {
    /// The underlying cursor reported a low-level structural fault.
    MalformedStream(XmlError),
    /// An asserted start/end boundary does not match the expected node.
    StructuralMismatch {
        /// What the schema expected at this position.
        expected: String,
        /// What the stream actually held.
        found: String,
    },
    /// A complex element's child has no corresponding schema child.
    UnknownProperty {
        /// The unresolvable child name.
        name: String,
    },
    /// A scalar-described property was treated as complex, or vice versa.
    TypeMismatch {
        /// The offending property name.
        property: String,
        /// What the operation required.
        expected: &'static str,
    },
    /// A wire `m:type` attribute disagrees with the declared complex type.
    InvalidComplexType {
        /// The qualified type name the schema declares.
        expected: String,
        /// The qualified type name found on the wire.
        actual: String,
    },
    /// The scalar converter rejected the element text.
    Conversion {
        /// The offending property name.
        property: String,
        /// The underlying conversion error.
        source: ConvertError,
    },
    /// The inline count text is non-numeric or negative.
    InlineCountInvalid {
        /// The offending text, or empty when it could not be parsed at all.
        detail: String,
    },
    /// A mandatory namespace URI is not bound on the feed boundary.
    MissingNamespace {
        /// The missing URI.
        uri: String,
    },
}

impl ReadErrorKind {
    /// Returns a stable error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ReadErrorKind::MalformedStream(_) => "atom::malformed_stream",
            ReadErrorKind::StructuralMismatch { .. } => "atom::structural_mismatch",
            ReadErrorKind::UnknownProperty { .. } => "atom::unknown_property",
            ReadErrorKind::TypeMismatch { .. } => "atom::type_mismatch",
            ReadErrorKind::InvalidComplexType { .. } => "atom::invalid_complex_type",
            ReadErrorKind::Conversion { .. } => "atom::conversion",
            ReadErrorKind::InlineCountInvalid { .. } => "atom::inline_count_invalid",
            ReadErrorKind::MissingNamespace { .. } => "atom::missing_namespace",
        }
    }
}

impl Display for ReadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadErrorKind::MalformedStream(e) => {
                write!(f, "malformed xml stream ({}): {e}", e.category())
            }
            ReadErrorKind::StructuralMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ReadErrorKind::UnknownProperty { name } => {
                write!(f, "invalid property '{name}'")
            }
            ReadErrorKind::TypeMismatch { property, expected } => {
                write!(f, "property '{property}' is not {expected}")
            }
            ReadErrorKind::InvalidComplexType { expected, actual } => {
                write!(
                    f,
                    "invalid complex type: expected '{expected}', found '{actual}'"
                )
            }
            ReadErrorKind::Conversion { property, source } => {
                write!(f, "cannot convert property '{property}': {source}")
            }
            ReadErrorKind::InlineCountInvalid { detail } => {
                write!(f, "invalid inline count ('{detail}')")
            }
            ReadErrorKind::MissingNamespace { uri } => {
                write!(f, "missing namespace binding for '{uri}'")
            }
        }
    }
}

impl From<XmlError> for ReadErrorKind {
    fn from(value: XmlError) -> Self {
        Self::MalformedStream(value)
    }
}
