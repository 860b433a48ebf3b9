//! Decoding of one `atom:entry` element.

use std::collections::HashMap;

use odata_edm::{EntityInfo, Value, namespace};

use crate::config::ReadProperties;
use crate::cursor::{XmlCursor, XmlEvent};
use crate::error::{ReadError, ReadErrorKind};
use crate::format;
use crate::property;
use crate::tracing_macros::trace;

/// One decoded entry: its data properties plus the Atom metadata found on
/// the entry element.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    metadata: EntryMetadata,
    properties: HashMap<String, Value>,
}

impl Entry {
    /// The Atom metadata of this entry.
    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    /// The decoded data properties, keyed by property name.
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    /// Look up one decoded property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Atom metadata carried on an entry. All fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    id: Option<String>,
    title: Option<String>,
    updated: Option<String>,
    etag: Option<String>,
}

impl EntryMetadata {
    /// The `atom:id` text.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The `atom:title` text.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The `atom:updated` text.
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// The `m:etag` attribute of the entry element.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

/// Decode one entry.
///
/// The cursor must sit at the `atom:entry` start boundary; on success it is
/// left just past the entry's closing boundary. Data properties are found
/// inside `atom:content` (inline entries) or directly under the entry
/// (media-link entries); either way they live in an `m:properties` element
/// and are resolved against `entity`. Unrecognized children (links,
/// categories, extensions) are skipped structurally.
pub fn read_entry(
    cursor: &mut XmlCursor<'_>,
    entity: &EntityInfo,
    config: &ReadProperties,
) -> Result<Entry, ReadError> {
    trace!(entity = entity.name(), "reading entry");
    cursor.require_start(namespace::ATOM, format::ATOM_ENTRY)?;

    let mut metadata = EntryMetadata {
        etag: cursor
            .attribute_value(Some(namespace::METADATA), format::M_ETAG)
            .map(str::to_owned),
        ..EntryMetadata::default()
    };
    let mut properties = HashMap::new();

    loop {
        cursor.next_tag()?;
        let local = match cursor.current() {
            XmlEvent::EndElement { name }
                if name.matches(format::ATOM_ENTRY, Some(namespace::ATOM)) =>
            {
                break;
            }
            XmlEvent::EndElement { .. } => continue,
            XmlEvent::StartElement { name, .. } => name.local_name().to_owned(),
            _ => continue,
        };

        match local.as_str() {
            format::ATOM_ID => metadata.id = Some(cursor.element_text()?),
            format::ATOM_TITLE => metadata.title = Some(cursor.element_text()?),
            format::ATOM_UPDATED => metadata.updated = Some(cursor.element_text()?),
            format::ATOM_CONTENT => read_content(cursor, entity, config, &mut properties)?,
            format::M_PROPERTIES => {
                read_properties_element(cursor, entity, config, &mut properties)?;
            }
            _ => cursor.skip_element()?,
        }
    }

    // Leave the cursor past the closing boundary; the feed loop
    // re-synchronizes from there.
    cursor.advance()?;

    Ok(Entry {
        metadata,
        properties,
    })
}

/// Consume `atom:content`: inline content holds the `m:properties` element,
/// media content (a `src` attribute) is empty and skipped.
fn read_content(
    cursor: &mut XmlCursor<'_>,
    entity: &EntityInfo,
    config: &ReadProperties,
    properties: &mut HashMap<String, Value>,
) -> Result<(), ReadError> {
    cursor.require_start(namespace::ATOM, format::ATOM_CONTENT)?;

    if cursor.attribute_value(None, format::ATOM_SRC).is_some() {
        cursor.skip_element()?;
        return Ok(());
    }

    loop {
        cursor.next_tag()?;
        match cursor.current() {
            XmlEvent::EndElement { name }
                if name.matches(format::ATOM_CONTENT, Some(namespace::ATOM)) =>
            {
                return Ok(());
            }
            XmlEvent::EndElement { .. } => {}
            XmlEvent::StartElement { name, .. }
                if name.matches(format::M_PROPERTIES, Some(namespace::METADATA)) =>
            {
                read_properties_element(cursor, entity, config, properties)?;
            }
            XmlEvent::StartElement { .. } => cursor.skip_element()?,
            _ => {}
        }
    }
}

/// Consume one `m:properties` element, resolving every child against the
/// entity schema and decoding it through the property decoder.
fn read_properties_element(
    cursor: &mut XmlCursor<'_>,
    entity: &EntityInfo,
    config: &ReadProperties,
    properties: &mut HashMap<String, Value>,
) -> Result<(), ReadError> {
    cursor.require_start(namespace::METADATA, format::M_PROPERTIES)?;

    cursor.next_tag()?;
    loop {
        let property_name = match cursor.current() {
            XmlEvent::StartElement { name, .. } => name.local_name().to_owned(),
            _ => break,
        };
        let info = entity.property(&property_name).ok_or_else(|| {
            ReadError::from(ReadErrorKind::UnknownProperty {
                name: property_name.clone(),
            })
        })?;
        let value = property::read_started_element(cursor, info, config.type_mappings())?;
        properties.insert(property_name, value);
        cursor.next_tag()?;
    }

    cursor.require_end(namespace::METADATA, format::M_PROPERTIES)?;
    Ok(())
}
