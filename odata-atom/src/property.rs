//! The recursive property/value decoder and the default-merge pass.

use std::collections::HashMap;

use odata_edm::{PropertyInfo, PropertyKind, TypeMapping, Value, namespace};

use crate::cursor::{XmlCursor, XmlEvent};
use crate::error::{ReadError, ReadErrorKind};
use crate::format;
use crate::tracing_macros::trace;

/// Decode a single-property document.
///
/// The cursor must sit at the document start; it is advanced to the property
/// element and the element is decoded against `info`. For complex
/// properties, `merge` opts into the default-merge pass afterwards.
pub fn read_property(
    cursor: &mut XmlCursor<'_>,
    info: &PropertyInfo,
    merge: bool,
    mappings: &TypeMapping,
) -> Result<Value, ReadError> {
    cursor.advance()?;
    let mut value = read_started_element(cursor, info, mappings)?;
    if info.is_complex() && merge {
        merge_with_default_values(&mut value, info)?;
    }
    Ok(value)
}

/// Decode one schema-described property element.
///
/// The cursor must sit at the element's start boundary; on success it is
/// left at the element's matching end boundary, having consumed exactly the
/// element's event range. The result is a typed scalar, a nested
/// name→value mapping, or [`Value::Null`] when the element carries the wire
/// null marker.
pub fn read_started_element(
    cursor: &mut XmlCursor<'_>,
    info: &PropertyInfo,
    mappings: &TypeMapping,
) -> Result<Value, ReadError> {
    trace!(property = info.name(), "reading property element");
    cursor.require_start(namespace::DATA_SERVICES, info.name())?;

    let is_null = cursor.attribute_value(Some(namespace::METADATA), format::M_NULL)
        == Some(format::TRUE_LITERAL);

    let value = if is_null {
        // An explicit null trumps the declared type and any child content.
        cursor.skip_element()?;
        Value::Null
    } else {
        match info.kind() {
            PropertyKind::Complex(complex) => {
                if let Some(actual) =
                    cursor.attribute_value(Some(namespace::METADATA), format::M_TYPE)
                {
                    let expected = complex.qualified_name();
                    if actual != expected {
                        return Err(ReadErrorKind::InvalidComplexType {
                            expected,
                            actual: actual.to_owned(),
                        }
                        .into());
                    }
                }

                let mut children = HashMap::new();
                cursor.next_tag()?;
                loop {
                    let child_name = match cursor.current() {
                        XmlEvent::StartElement { name, .. } => name.local_name().to_owned(),
                        _ => break,
                    };
                    let child = complex.property(&child_name).ok_or_else(|| {
                        ReadError::from(ReadErrorKind::UnknownProperty {
                            name: child_name.clone(),
                        })
                    })?;
                    let child_value =
                        read_started_element(cursor, child, mappings.child(info.name()))?;
                    children.insert(child_name, child_value);
                    cursor.next_tag()?;
                }
                // No children is an empty complex value, not a null.
                Value::Complex(children)
            }
            PropertyKind::Simple(simple_type) => {
                let text = cursor.element_text()?;
                let target = mappings.target_for(info.name());
                simple_type
                    .value_of_string(&text, info.facets(), target)
                    .map_err(|source| ReadErrorKind::Conversion {
                        property: info.name().to_owned(),
                        source,
                    })?
            }
        }
    };

    cursor.require_end(namespace::DATA_SERVICES, info.name())?;
    Ok(value)
}

/// Fill schema-declared children absent from a decoded complex value.
///
/// Single-level by contract: a missing complex child is inserted as an
/// *empty* complex value, a missing scalar child gets its facet default
/// literal (converted) if one is declared. Already-present children are
/// never touched, which makes the pass idempotent. Callers wanting deep
/// defaults descend per level with the matching child schema themselves.
pub fn merge_with_default_values(value: &mut Value, info: &PropertyInfo) -> Result<(), ReadError> {
    let Some(complex) = info.complex_type() else {
        return Err(ReadErrorKind::TypeMismatch {
            property: info.name().to_owned(),
            expected: "a complex property",
        }
        .into());
    };
    let Value::Complex(children) = value else {
        return Err(ReadErrorKind::TypeMismatch {
            property: info.name().to_owned(),
            expected: "a complex value",
        }
        .into());
    };

    for child in complex.properties() {
        if children.contains_key(child.name()) {
            continue;
        }
        match child.kind() {
            PropertyKind::Complex(_) => {
                children.insert(child.name().to_owned(), Value::Complex(HashMap::new()));
            }
            PropertyKind::Simple(simple_type) => {
                if let Some(facets) = child.facets()
                    && let Some(default) = facets.default_value()
                {
                    let converted = simple_type
                        .value_of_string(default, Some(facets), None)
                        .map_err(|source| ReadErrorKind::Conversion {
                            property: child.name().to_owned(),
                            source,
                        })?;
                    children.insert(child.name().to_owned(), converted);
                }
            }
        }
    }
    Ok(())
}
