//! Streaming pull cursor over an XML document, built on quick-xml.
//!
//! The cursor presents a *current event* model to the consumers: after
//! construction it sits at [`XmlEvent::StartDocument`]; every call to
//! [`XmlCursor::advance`] moves it one event forward. Self-closing elements
//! are reported as a start followed by a matching end, so consumers only
//! ever deal with balanced boundaries. Comments, processing instructions,
//! the XML declaration and DOCTYPE are consumed silently; CDATA sections and
//! resolved entity references surface as [`XmlEvent::Characters`].
//!
//! The cursor is an exclusively-owned, forward-only resource. It is passed
//! by `&mut` through the recursive decoding chain and released by ordinary
//! scope exit on both success and error paths.

use core::fmt;

use quick_xml::NsReader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;

use crate::error::{ReadError, ReadErrorKind};
use crate::tracing_macros::trace;

/// A qualified XML name with optional namespace URI.
///
/// Names are compared by URI, not by prefix: `d:Age` and `data:Age` are the
/// same name if both prefixes resolve to the same namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    namespace: Option<String>,
    local_name: String,
}

impl QName {
    /// Create a qualified name with no namespace.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: name.into(),
        }
    }

    /// Create a qualified name with a namespace.
    pub fn with_ns(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// The namespace URI, or `None` for "no namespace".
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local name (without prefix).
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Check if this name matches a local name with an optional expected
    /// namespace. `None` matches any namespace (or none).
    pub fn matches(&self, local_name: &str, expected_ns: Option<&str>) -> bool {
        if self.local_name != local_name {
            return false;
        }
        match expected_ns {
            None => true,
            Some(ns) => self.namespace.as_deref() == Some(ns),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// An attribute on a start element. `xmlns` declarations are not attributes;
/// they are reported through [`XmlEvent::StartElement`]'s declaration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name. Unprefixed attributes are in no namespace.
    pub name: QName,
    /// The unescaped attribute value.
    pub value: String,
}

/// One event of the pull stream.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    /// Initial state, before the first element.
    StartDocument,
    /// Start of an element.
    StartElement {
        /// The resolved element name.
        name: QName,
        /// Attributes in document order, excluding namespace declarations.
        attributes: Vec<Attribute>,
        /// Namespace bindings declared on this element: prefix → URI, with
        /// the default namespace keyed by the empty string.
        namespace_declarations: Vec<(String, String)>,
    },
    /// End of an element (synthesized for self-closing elements).
    EndElement {
        /// The resolved element name.
        name: QName,
    },
    /// Text content (character data, CDATA, or a resolved entity reference).
    Characters(String),
    /// End of the document; the cursor stays here.
    EndDocument,
}

impl XmlEvent {
    /// Short human-readable description, used in mismatch diagnostics.
    pub fn describe(&self) -> String {
        match self {
            XmlEvent::StartDocument => "document start".into(),
            XmlEvent::StartElement { name, .. } => format!("start of {name}"),
            XmlEvent::EndElement { name } => format!("end of {name}"),
            XmlEvent::Characters(_) => "text content".into(),
            XmlEvent::EndDocument => "document end".into(),
        }
    }
}

/// Low-level stream fault reported by the cursor.
#[derive(Debug, Clone)]
pub enum XmlError {
    /// Error from quick-xml.
    Parse(String),
    /// Unexpected end of input.
    UnexpectedEof,
    /// Text content where only elements are allowed.
    UnexpectedText,
    /// A child element inside text-only content.
    UnexpectedElement,
    /// Invalid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
}

impl XmlError {
    /// The fault's category name, wrapped as detail by the consumer error.
    pub fn category(&self) -> &'static str {
        match self {
            XmlError::Parse(_) => "Parse",
            XmlError::UnexpectedEof => "UnexpectedEof",
            XmlError::UnexpectedText => "UnexpectedText",
            XmlError::UnexpectedElement => "UnexpectedElement",
            XmlError::InvalidUtf8(_) => "InvalidUtf8",
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Parse(msg) => write!(f, "XML parse error: {}", msg),
            XmlError::UnexpectedEof => write!(f, "Unexpected end of XML"),
            XmlError::UnexpectedText => write!(f, "Unexpected text content between elements"),
            XmlError::UnexpectedElement => write!(f, "Unexpected element in text-only content"),
            XmlError::InvalidUtf8(e) => write!(f, "Invalid UTF-8 in XML: {}", e),
        }
    }
}

impl std::error::Error for XmlError {}

/// Streaming XML cursor.
pub struct XmlCursor<'buf> {
    reader: NsReader<&'buf [u8]>,
    /// Buffer for quick-xml events.
    buf: Vec<u8>,
    current: XmlEvent,
    /// End synthesized for a self-closing element, delivered on the next
    /// advance.
    pending_end: Option<QName>,
}

impl<'buf> XmlCursor<'buf> {
    /// Create a cursor over a complete document, positioned at
    /// [`XmlEvent::StartDocument`].
    pub fn new(input: &'buf [u8]) -> Self {
        trace!(input_len = input.len(), "creating XML cursor");

        let mut reader = NsReader::from_reader(input);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            buf: Vec::new(),
            current: XmlEvent::StartDocument,
            pending_end: None,
        }
    }

    /// The event the cursor currently sits at.
    pub fn current(&self) -> &XmlEvent {
        &self.current
    }

    /// True until the cursor reaches [`XmlEvent::EndDocument`].
    pub fn has_next(&self) -> bool {
        !matches!(self.current, XmlEvent::EndDocument)
    }

    /// True if the current event is a start element.
    pub fn is_start_element(&self) -> bool {
        matches!(self.current, XmlEvent::StartElement { .. })
    }

    /// True if the current event is an end element.
    pub fn is_end_element(&self) -> bool {
        matches!(self.current, XmlEvent::EndElement { .. })
    }

    /// The local name of the current start or end element.
    pub fn local_name(&self) -> Option<&str> {
        match &self.current {
            XmlEvent::StartElement { name, .. } | XmlEvent::EndElement { name } => {
                Some(name.local_name())
            }
            _ => None,
        }
    }

    /// The namespace URI of the current start or end element.
    pub fn namespace_uri(&self) -> Option<&str> {
        match &self.current {
            XmlEvent::StartElement { name, .. } | XmlEvent::EndElement { name } => name.namespace(),
            _ => None,
        }
    }

    /// The value of an attribute on the current start element.
    ///
    /// `namespace: None` matches attributes in no namespace (unprefixed
    /// attributes are never in the default namespace).
    pub fn attribute_value(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        match &self.current {
            XmlEvent::StartElement { attributes, .. } => attributes
                .iter()
                .find(|a| a.name.local_name() == local_name && a.name.namespace() == namespace)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// The namespace bindings declared on the current start element.
    pub fn namespace_declarations(&self) -> &[(String, String)] {
        match &self.current {
            XmlEvent::StartElement {
                namespace_declarations,
                ..
            } => namespace_declarations,
            _ => &[],
        }
    }

    /// Move one event forward.
    pub fn advance(&mut self) -> Result<&XmlEvent, XmlError> {
        self.current = self.read_event()?;
        Ok(&self.current)
    }

    /// Advance to the next start or end element.
    ///
    /// Non-whitespace text encountered on the way is a stream fault, as is
    /// the end of the document.
    pub fn next_tag(&mut self) -> Result<&XmlEvent, XmlError> {
        loop {
            match self.advance()? {
                XmlEvent::StartElement { .. } | XmlEvent::EndElement { .. } => break,
                XmlEvent::Characters(_) => return Err(XmlError::UnexpectedText),
                XmlEvent::EndDocument => return Err(XmlError::UnexpectedEof),
                XmlEvent::StartDocument => {}
            }
        }
        Ok(&self.current)
    }

    /// Read the text content of the current element.
    ///
    /// The cursor must sit at a start element; on success it is left at the
    /// element's matching end. An empty element yields the empty string; a
    /// child element is a stream fault.
    pub fn element_text(&mut self) -> Result<String, XmlError> {
        if !self.is_start_element() {
            return Err(XmlError::Parse(
                "element text requested outside a start element".into(),
            ));
        }
        let mut text = String::new();
        loop {
            match self.advance()? {
                XmlEvent::Characters(chunk) => text.push_str(chunk),
                XmlEvent::EndElement { .. } => return Ok(text),
                XmlEvent::StartElement { .. } => return Err(XmlError::UnexpectedElement),
                XmlEvent::EndDocument => return Err(XmlError::UnexpectedEof),
                XmlEvent::StartDocument => {}
            }
        }
    }

    /// Skip the current element and all its descendants.
    ///
    /// The cursor must sit at a start element; on success it is left at the
    /// element's matching end.
    pub fn skip_element(&mut self) -> Result<(), XmlError> {
        if !self.is_start_element() {
            return Err(XmlError::Parse(
                "skip requested outside a start element".into(),
            ));
        }
        let mut depth = 0usize;
        loop {
            match self.advance()? {
                XmlEvent::StartElement { .. } => depth += 1,
                XmlEvent::EndElement { .. } => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                XmlEvent::EndDocument => return Err(XmlError::UnexpectedEof),
                XmlEvent::Characters(_) | XmlEvent::StartDocument => {}
            }
        }
    }

    /// Assert that the cursor sits at the start of the named element.
    pub fn require_start(&self, namespace: &str, local_name: &str) -> Result<(), ReadError> {
        match &self.current {
            XmlEvent::StartElement { name, .. } if name.matches(local_name, Some(namespace)) => {
                Ok(())
            }
            other => Err(ReadErrorKind::StructuralMismatch {
                expected: format!("start of {{{namespace}}}{local_name}"),
                found: other.describe(),
            }
            .into()),
        }
    }

    /// Assert that the cursor sits at the end of the named element.
    pub fn require_end(&self, namespace: &str, local_name: &str) -> Result<(), ReadError> {
        match &self.current {
            XmlEvent::EndElement { name } if name.matches(local_name, Some(namespace)) => Ok(()),
            other => Err(ReadErrorKind::StructuralMismatch {
                expected: format!("end of {{{namespace}}}{local_name}"),
                found: other.describe(),
            }
            .into()),
        }
    }

    fn read_event(&mut self) -> Result<XmlEvent, XmlError> {
        if let Some(name) = self.pending_end.take() {
            return Ok(XmlEvent::EndElement { name });
        }
        if matches!(self.current, XmlEvent::EndDocument) {
            return Ok(XmlEvent::EndDocument);
        }

        loop {
            self.buf.clear();
            let (resolve, event) = self
                .reader
                .read_resolved_event_into(&mut self.buf)
                .map_err(|e| XmlError::Parse(e.to_string()))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let ns = resolve_namespace(resolve)?;
                    let local = core::str::from_utf8(e.local_name().as_ref())
                        .map_err(XmlError::InvalidUtf8)?
                        .to_string();
                    let name = match ns {
                        Some(uri) => QName::with_ns(uri, local),
                        None => QName::local(local),
                    };

                    let mut attributes = Vec::new();
                    let mut namespace_declarations = Vec::new();
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
                        let key = attr.key;
                        let value = attr
                            .decode_and_unescape_value(self.reader.decoder())
                            .map_err(|e| XmlError::Parse(e.to_string()))?
                            .into_owned();

                        if key.as_ref() == b"xmlns" {
                            namespace_declarations.push((String::new(), value));
                            continue;
                        }
                        if let Some(prefix) = key.prefix()
                            && prefix.as_ref() == b"xmlns"
                        {
                            let local = core::str::from_utf8(key.local_name().as_ref())
                                .map_err(XmlError::InvalidUtf8)?
                                .to_string();
                            namespace_declarations.push((local, value));
                            continue;
                        }

                        let (attr_resolve, _) = self.reader.resolver().resolve_attribute(key);
                        let attr_ns = resolve_namespace(attr_resolve)?;
                        let attr_local = core::str::from_utf8(key.local_name().as_ref())
                            .map_err(XmlError::InvalidUtf8)?
                            .to_string();
                        let attr_name = match attr_ns {
                            Some(uri) => QName::with_ns(uri, attr_local),
                            None => QName::local(attr_local),
                        };
                        attributes.push(Attribute {
                            name: attr_name,
                            value,
                        });
                    }

                    if matches!(event, Event::Empty(_)) {
                        self.pending_end = Some(name.clone());
                    }
                    return Ok(XmlEvent::StartElement {
                        name,
                        attributes,
                        namespace_declarations,
                    });
                }
                Event::End(ref e) => {
                    let ns = resolve_namespace(resolve)?;
                    let local = core::str::from_utf8(e.local_name().as_ref())
                        .map_err(XmlError::InvalidUtf8)?
                        .to_string();
                    let name = match ns {
                        Some(uri) => QName::with_ns(uri, local),
                        None => QName::local(local),
                    };
                    return Ok(XmlEvent::EndElement { name });
                }
                Event::Text(e) => {
                    let text = e.decode().map_err(|err| XmlError::Parse(err.to_string()))?;
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(XmlEvent::Characters(text.into_owned()));
                }
                Event::CData(e) => {
                    let text =
                        core::str::from_utf8(e.as_ref()).map_err(XmlError::InvalidUtf8)?;
                    return Ok(XmlEvent::Characters(text.to_string()));
                }
                Event::GeneralRef(e) => {
                    // Entity references are reported separately in quick-xml 0.38+.
                    let raw = e.decode().map_err(|err| XmlError::Parse(err.to_string()))?;
                    return Ok(XmlEvent::Characters(resolve_entity(&raw)?));
                }
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => return Ok(XmlEvent::EndDocument),
            }
        }
    }
}

/// Resolve a namespace from quick-xml's ResolveResult.
fn resolve_namespace(resolve: ResolveResult<'_>) -> Result<Option<String>, XmlError> {
    match resolve {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        // Unknown prefix - treat as no namespace
        ResolveResult::Unknown(_) => Ok(None),
    }
}

/// Resolve a general entity reference to its character value.
/// Handles both named entities (lt, gt, amp, etc.) and numeric entities
/// (&#10;, &#x09;, etc.)
fn resolve_entity(raw: &str) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
                .map_err(|_| XmlError::Parse(format!("Invalid hex numeric entity: #{}", rest)))?
        } else {
            rest.parse::<u32>()
                .map_err(|_| XmlError::Parse(format!("Invalid decimal numeric entity: #{}", rest)))?
        };

        let ch = char::from_u32(code)
            .ok_or_else(|| XmlError::Parse(format!("Invalid Unicode code point: {}", code)))?;
        return Ok(ch.to_string());
    }

    // Unknown entity - return as-is with & and ;
    Ok(format!("&{};", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(xml: &str) -> XmlCursor<'_> {
        XmlCursor::new(xml.as_bytes())
    }

    #[test]
    fn self_closing_element_synthesizes_end() {
        let mut c = cursor(r#"<root><empty/></root>"#);
        c.advance().unwrap();
        c.advance().unwrap();
        assert!(c.is_start_element());
        assert_eq!(c.local_name(), Some("empty"));
        c.advance().unwrap();
        assert!(c.is_end_element());
        assert_eq!(c.local_name(), Some("empty"));
    }

    #[test]
    fn element_text_collects_entities_and_cdata() {
        // Surrounding whitespace of each text chunk is insignificant and
        // trimmed by the reader configuration.
        let mut c = cursor(r#"<v>a&amp;b<![CDATA[ & c]]></v>"#);
        c.advance().unwrap();
        assert_eq!(c.element_text().unwrap(), "a&b & c");
    }

    #[test]
    fn element_text_rejects_child_elements() {
        let mut c = cursor(r#"<v>text<child/></v>"#);
        c.advance().unwrap();
        assert!(matches!(c.element_text(), Err(XmlError::UnexpectedElement)));
    }

    #[test]
    fn skip_element_handles_nested_same_names() {
        let mut c = cursor(r#"<root><a><a><b/></a>tail</a><next/></root>"#);
        c.advance().unwrap();
        c.advance().unwrap();
        assert_eq!(c.local_name(), Some("a"));
        c.skip_element().unwrap();
        assert!(c.is_end_element());
        c.next_tag().unwrap();
        assert_eq!(c.local_name(), Some("next"));
    }

    #[test]
    fn namespace_declarations_are_collected() {
        let mut c = cursor(
            r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:m="urn:m"><x/></feed>"#,
        );
        c.advance().unwrap();
        let decls = c.namespace_declarations();
        assert!(decls.contains(&(String::new(), "http://www.w3.org/2005/Atom".to_string())));
        assert!(decls.contains(&("m".to_string(), "urn:m".to_string())));
    }

    #[test]
    fn attribute_lookup_by_namespace() {
        let mut c = cursor(r#"<p xmlns:m="urn:m" m:null="true" plain="x"/>"#);
        c.advance().unwrap();
        assert_eq!(c.attribute_value(Some("urn:m"), "null"), Some("true"));
        assert_eq!(c.attribute_value(None, "plain"), Some("x"));
        assert_eq!(c.attribute_value(None, "null"), None);
    }

    #[test]
    fn next_tag_rejects_stray_text() {
        let mut c = cursor(r#"<root>stray<child/></root>"#);
        c.advance().unwrap();
        assert!(matches!(c.next_tag(), Err(XmlError::UnexpectedText)));
    }

    #[test]
    fn cursor_is_sticky_at_document_end() {
        let mut c = cursor(r#"<root/>"#);
        c.advance().unwrap();
        c.advance().unwrap();
        c.advance().unwrap();
        assert!(matches!(c.current(), XmlEvent::EndDocument));
        c.advance().unwrap();
        assert!(matches!(c.current(), XmlEvent::EndDocument));
        assert!(!c.has_next());
    }
}
