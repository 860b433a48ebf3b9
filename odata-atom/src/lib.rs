//! Streaming Atom/XML consumer for OData 2.0 feeds, entries and properties.
//!
//! Decoding is driven by caller-supplied schema views from [`odata_edm`]:
//! the consumer walks the wire events and consults the views at every step,
//! so nothing here depends on compile-time knowledge of the payload shape.
//!
//! The crate offers two levels of API. The `*_from_str` functions decode a
//! complete document in one call. Callers that already own a positioned
//! [`XmlCursor`] (for instance to decode several documents from one stream
//! framing layer) drive the [`property`], [`entry`] and [`feed`] modules
//! directly.
//!
//! # Example
//!
//! ```
//! use odata_atom::{ReadProperties, property_from_str};
//! use odata_edm::{PropertyInfo, SimpleType, Value};
//!
//! let xml = r#"<Age xmlns="http://schemas.microsoft.com/ado/2007/08/dataservices">67</Age>"#;
//! let age = PropertyInfo::simple("Age", SimpleType::Int32);
//!
//! let value = property_from_str(xml, &age, &ReadProperties::init()).unwrap();
//! assert_eq!(value, Value::Int32(67));
//! ```

#![deny(unsafe_code)]

mod config;
mod cursor;
mod error;
mod tracing_macros;

pub mod entry;
pub mod feed;
pub mod format;
pub mod property;

pub use config::ReadProperties;
pub use cursor::{Attribute, QName, XmlCursor, XmlError, XmlEvent};
pub use entry::{Entry, EntryMetadata};
pub use error::{ReadError, ReadErrorKind};
pub use feed::{Feed, FeedMetadata};

// Re-export the model crate for convenience
pub use odata_edm;

use odata_edm::{EntityInfo, PropertyInfo, Value};

/// Decode a single-property document from an XML string.
///
/// The property element is validated and decoded against `info`; when the
/// configuration opts into merge semantics and the property is complex, the
/// default-merge pass fills schema-declared children the document omitted.
pub fn property_from_str(
    xml: &str,
    info: &PropertyInfo,
    config: &ReadProperties,
) -> Result<Value, ReadError> {
    let mut cursor = XmlCursor::new(xml.as_bytes());
    property::read_property(
        &mut cursor,
        info,
        config.merge_semantics(),
        config.type_mappings(),
    )
}

/// Decode a feed document from an XML string.
pub fn feed_from_str(
    xml: &str,
    entity: &EntityInfo,
    config: &ReadProperties,
) -> Result<Feed, ReadError> {
    let mut cursor = XmlCursor::new(xml.as_bytes());
    feed::read_feed(&mut cursor, entity, config)
}

/// Decode a standalone entry document from an XML string.
pub fn entry_from_str(
    xml: &str,
    entity: &EntityInfo,
    config: &ReadProperties,
) -> Result<Entry, ReadError> {
    let mut cursor = XmlCursor::new(xml.as_bytes());
    cursor.next_tag()?;
    entry::read_entry(&mut cursor, entity, config)
}
