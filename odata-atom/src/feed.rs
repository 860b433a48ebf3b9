//! Decoding of a feed envelope: entries interleaved with feed metadata.

use std::collections::HashMap;

use odata_edm::{EntityInfo, namespace};

use crate::config::ReadProperties;
use crate::cursor::{XmlCursor, XmlEvent};
use crate::entry::{self, Entry};
use crate::error::{ReadError, ReadErrorKind};
use crate::format;
use crate::tracing_macros::trace;

/// A decoded feed: entries in document order plus the feed-level metadata
/// found between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    entries: Vec<Entry>,
    metadata: FeedMetadata,
}

impl Feed {
    /// The decoded entries, in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The feed-level metadata.
    pub fn metadata(&self) -> &FeedMetadata {
        &self.metadata
    }
}

/// Feed-level metadata. All fields are absent by default; repeated wire
/// elements overwrite earlier values (last wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedMetadata {
    inline_count: Option<u32>,
    next_link: Option<String>,
    delta_link: Option<String>,
}

impl FeedMetadata {
    /// The inline count hint, if the feed carried one. Never negative.
    pub fn inline_count(&self) -> Option<u32> {
        self.inline_count
    }

    /// The pagination continuation URI, if the feed carried one.
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// The incremental-change continuation URI, if the feed carried one.
    pub fn delta_link(&self) -> Option<&str> {
        self.delta_link.as_deref()
    }
}

/// Decode a feed document.
///
/// The cursor must sit at the document start. The feed boundary's namespace
/// declarations are unioned with the configuration's already-validated
/// bindings and checked for the three mandatory namespaces before any entry
/// is decoded; entries then run against the resulting effective
/// configuration.
pub fn read_feed(
    cursor: &mut XmlCursor<'_>,
    entity: &EntityInfo,
    config: &ReadProperties,
) -> Result<Feed, ReadError> {
    trace!(entity = entity.name(), "reading feed");
    match cursor.current() {
        XmlEvent::StartDocument => {}
        other => {
            return Err(ReadErrorKind::StructuralMismatch {
                expected: "document start".into(),
                found: other.describe(),
            }
            .into());
        }
    }
    cursor.next_tag()?;
    cursor.require_start(namespace::ATOM, format::ATOM_FEED)?;

    let mut bindings: HashMap<String, String> =
        cursor.namespace_declarations().iter().cloned().collect();
    bindings.extend(
        config
            .validated_prefixes()
            .iter()
            .map(|(prefix, uri)| (prefix.clone(), uri.clone())),
    );
    check_mandatory_namespaces(&bindings)?;
    let entry_config = ReadProperties::init_from(config).with_validated_prefixes(bindings);

    read_feed_data(cursor, entity, &entry_config)
}

/// Read all feed data: entries, the inline count and pagination links, in
/// any order and repetition, until the feed's matching end boundary.
fn read_feed_data(
    cursor: &mut XmlCursor<'_>,
    entity: &EntityInfo,
    entry_config: &ReadProperties,
) -> Result<Feed, ReadError> {
    let mut entries = Vec::new();
    let mut metadata = FeedMetadata::default();

    // Move off the feed boundary onto its first child (or its end).
    cursor.advance()?;
    advance_to_next_start(cursor)?;

    while cursor.has_next() && !is_feed_end(cursor) {
        if cursor.is_start_element() {
            let local = cursor.local_name().map(str::to_owned);
            match local.as_deref() {
                Some(format::ATOM_ENTRY) => {
                    entries.push(entry::read_entry(cursor, entity, entry_config)?);
                }
                Some(format::M_COUNT) => read_inline_count(cursor, &mut metadata)?,
                Some(format::ATOM_LINK) => read_link(cursor, &mut metadata)?,
                // Unrecognized content - skip for forward compatibility.
                _ => {
                    cursor.advance()?;
                }
            }
        } else {
            cursor.advance()?;
        }
        advance_to_next_start(cursor)?;
    }

    Ok(Feed { entries, metadata })
}

/// Parse the `m:count` element into the metadata accumulator.
///
/// Empty count elements are ignored; non-numeric or negative text is an
/// error. A later count overwrites an earlier one.
fn read_inline_count(
    cursor: &mut XmlCursor<'_>,
    metadata: &mut FeedMetadata,
) -> Result<(), ReadError> {
    cursor.require_start(namespace::METADATA, format::M_COUNT)?;

    cursor.advance()?;
    if let XmlEvent::Characters(text) = cursor.current() {
        let count: i32 = text.parse().map_err(|_| {
            ReadError::from(ReadErrorKind::InlineCountInvalid {
                detail: String::new(),
            })
        })?;
        if count < 0 {
            return Err(ReadErrorKind::InlineCountInvalid {
                detail: count.to_string(),
            }
            .into());
        }
        metadata.inline_count = Some(count as u32);
    }
    Ok(())
}

/// Route an `atom:link` element's `href` by its `rel` attribute. Relations
/// other than `next` and `delta` are ignored.
fn read_link(cursor: &mut XmlCursor<'_>, metadata: &mut FeedMetadata) -> Result<(), ReadError> {
    cursor.require_start(namespace::ATOM, format::ATOM_LINK)?;

    let rel = cursor.attribute_value(None, format::ATOM_REL).map(str::to_owned);
    let href = cursor.attribute_value(None, format::ATOM_HREF).map(str::to_owned);
    match rel.as_deref() {
        Some(format::ATOM_NEXT_LINK) => metadata.next_link = href,
        Some(format::ATOM_DELTA_LINK) => metadata.delta_link = href,
        _ => {}
    }

    cursor.advance()?;
    Ok(())
}

/// Advance until the next start element, the feed's end boundary, or the
/// end of the stream, so the loop always re-evaluates at one of those.
fn advance_to_next_start(cursor: &mut XmlCursor<'_>) -> Result<(), ReadError> {
    while cursor.has_next() && !cursor.is_start_element() && !is_feed_end(cursor) {
        cursor.advance()?;
    }
    Ok(())
}

fn is_feed_end(cursor: &XmlCursor<'_>) -> bool {
    matches!(cursor.current(), XmlEvent::EndElement { name }
        if name.matches(format::ATOM_FEED, Some(namespace::ATOM)))
}

/// Verify that the effective bindings cover the three mandatory namespaces.
fn check_mandatory_namespaces(bindings: &HashMap<String, String>) -> Result<(), ReadError> {
    for uri in [namespace::DATA_SERVICES, namespace::METADATA, namespace::ATOM] {
        if !bindings.values().any(|bound| bound == uri) {
            return Err(ReadErrorKind::MissingNamespace {
                uri: uri.to_owned(),
            }
            .into());
        }
    }
    Ok(())
}
