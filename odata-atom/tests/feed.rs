//! Tests for feed decoding: entries, inline count, pagination links.

use indoc::indoc;
use odata_atom::{ReadErrorKind, ReadProperties, feed_from_str};
use odata_edm::{EntityInfo, PropertyInfo, SimpleType, Value, namespace};

// ============================================================================
// Test helpers
// ============================================================================

fn rooms() -> EntityInfo {
    EntityInfo::new("Rooms")
        .with_property(PropertyInfo::simple("Id", SimpleType::String))
        .with_property(PropertyInfo::simple("Seats", SimpleType::Int32))
}

fn defaults() -> ReadProperties {
    ReadProperties::init()
}

/// A feed document with the given body between the feed tags. All three
/// mandatory namespaces are declared on the boundary.
fn feed_doc(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            "\n",
            r#"<feed xmlns="http://www.w3.org/2005/Atom""#,
            "\n",
            r#"      xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata""#,
            "\n",
            r#"      xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices">"#,
            "\n{}\n</feed>"
        ),
        body
    )
}

fn room_entry(id: &str, seats: i32) -> String {
    format!(
        indoc! {r#"
            <entry>
                <id>http://host/service/Rooms('{id}')</id>
                <title>Room {id}</title>
                <updated>2013-01-11T13:50:50Z</updated>
                <content type="application/xml">
                    <m:properties>
                        <d:Id>{id}</d:Id>
                        <d:Seats>{seats}</d:Seats>
                    </m:properties>
                </content>
            </entry>
        "#},
        id = id,
        seats = seats
    )
}

// ============================================================================
// Entries and metadata
// ============================================================================

#[test]
fn entries_count_and_next_link() {
    let body = format!(
        "<m:count>2</m:count>\n{}{}<link rel=\"next\" href=\"http://x/page2\"/>",
        room_entry("1", 123),
        room_entry("2", 456)
    );
    let feed = feed_from_str(&feed_doc(&body), &rooms(), &defaults()).unwrap();

    assert_eq!(feed.entries().len(), 2);
    // Document order is preserved.
    assert_eq!(
        feed.entries()[0].property("Id"),
        Some(&Value::String("1".into()))
    );
    assert_eq!(
        feed.entries()[1].property("Id"),
        Some(&Value::String("2".into()))
    );
    assert_eq!(
        feed.entries()[1].property("Seats"),
        Some(&Value::Int32(456))
    );
    assert_eq!(feed.metadata().inline_count(), Some(2));
    assert_eq!(feed.metadata().next_link(), Some("http://x/page2"));
    assert_eq!(feed.metadata().delta_link(), None);
}

#[test]
fn entry_metadata_is_captured() {
    let feed = feed_from_str(&feed_doc(&room_entry("1", 123)), &rooms(), &defaults()).unwrap();

    let metadata = feed.entries()[0].metadata();
    assert_eq!(metadata.id(), Some("http://host/service/Rooms('1')"));
    assert_eq!(metadata.title(), Some("Room 1"));
    assert_eq!(metadata.updated(), Some("2013-01-11T13:50:50Z"));
}

#[test]
fn empty_feed() {
    let feed = feed_from_str(&feed_doc(""), &rooms(), &defaults()).unwrap();
    assert!(feed.entries().is_empty());
    assert_eq!(*feed.metadata(), Default::default());
}

#[test]
fn delta_link_and_ignored_relations() {
    let body = indoc! {r#"
        <link rel="self" href="http://host/service/Rooms"/>
        <link rel="delta" href="http://host/service/Rooms?!deltatoken=4711"/>
    "#};
    let feed = feed_from_str(&feed_doc(body), &rooms(), &defaults()).unwrap();

    assert_eq!(
        feed.metadata().delta_link(),
        Some("http://host/service/Rooms?!deltatoken=4711")
    );
    assert_eq!(feed.metadata().next_link(), None);
}

#[test]
fn repeated_metadata_takes_the_last_value() {
    let body = indoc! {r#"
        <m:count>2</m:count>
        <link rel="next" href="http://x/first"/>
        <m:count>5</m:count>
        <link rel="next" href="http://x/second"/>
    "#};
    let feed = feed_from_str(&feed_doc(body), &rooms(), &defaults()).unwrap();

    assert_eq!(feed.metadata().inline_count(), Some(5));
    assert_eq!(feed.metadata().next_link(), Some("http://x/second"));
}

#[test]
fn unrecognized_elements_are_skipped() {
    let body = format!(
        "<generator>serve-o-matic</generator>\n{}<m:annotation>ignore me</m:annotation>\n{}",
        room_entry("1", 123),
        room_entry("2", 456)
    );
    let feed = feed_from_str(&feed_doc(&body), &rooms(), &defaults()).unwrap();

    assert_eq!(feed.entries().len(), 2);
    assert_eq!(feed.metadata().inline_count(), None);
}

#[test]
fn empty_count_element_is_ignored() {
    let feed = feed_from_str(&feed_doc("<m:count></m:count>"), &rooms(), &defaults()).unwrap();
    assert_eq!(feed.metadata().inline_count(), None);
}

// ============================================================================
// Invalid inline counts
// ============================================================================

#[test]
fn negative_count_is_invalid() {
    let result = feed_from_str(&feed_doc("<m:count>-1</m:count>"), &rooms(), &defaults());
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        ReadErrorKind::InlineCountInvalid { detail } if detail == "-1"
    ));
}

#[test]
fn non_numeric_count_is_invalid() {
    let result = feed_from_str(&feed_doc("<m:count>abc</m:count>"), &rooms(), &defaults());
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        ReadErrorKind::InlineCountInvalid { detail } if detail.is_empty()
    ));
}

#[test]
fn count_outside_the_metadata_namespace_is_structural() {
    // Local name matches, namespace does not.
    let result = feed_from_str(&feed_doc("<count>2</count>"), &rooms(), &defaults());
    assert!(matches!(
        result.unwrap_err().kind(),
        ReadErrorKind::StructuralMismatch { .. }
    ));
}

// ============================================================================
// Mandatory namespaces
// ============================================================================

#[test]
fn missing_data_namespace_is_reported() {
    let xml = indoc! {r#"
        <feed xmlns="http://www.w3.org/2005/Atom"
              xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
        </feed>
    "#};
    let result = feed_from_str(xml, &rooms(), &defaults());
    assert!(matches!(
        result.unwrap_err().kind(),
        ReadErrorKind::MissingNamespace { uri } if uri == namespace::DATA_SERVICES
    ));
}

#[test]
fn missing_metadata_namespace_is_reported() {
    let xml = indoc! {r#"
        <feed xmlns="http://www.w3.org/2005/Atom"
              xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices">
        </feed>
    "#};
    let result = feed_from_str(xml, &rooms(), &defaults());
    assert!(matches!(
        result.unwrap_err().kind(),
        ReadErrorKind::MissingNamespace { uri } if uri == namespace::METADATA
    ));
}

#[test]
fn validated_prefixes_satisfy_the_namespace_check() {
    let xml = indoc! {r#"
        <feed xmlns="http://www.w3.org/2005/Atom"
              xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
        </feed>
    "#};
    let config = ReadProperties::init()
        .with_validated_prefix("d", namespace::DATA_SERVICES);
    assert!(feed_from_str(xml, &rooms(), &config).is_ok());
}

// ============================================================================
// Media-link entries and etags
// ============================================================================

#[test]
fn entry_etag_is_captured() {
    let body = indoc! {r#"
        <entry m:etag="W/&quot;1&quot;">
            <id>http://host/service/Rooms('1')</id>
        </entry>
    "#};
    let feed = feed_from_str(&feed_doc(body), &rooms(), &defaults()).unwrap();
    assert_eq!(feed.entries()[0].metadata().etag(), Some(r#"W/"1""#));
}

#[test]
fn media_link_entry_reads_properties_outside_content() {
    let body = indoc! {r#"
        <entry>
            <id>http://host/service/Rooms('1')</id>
            <content type="image/png" src="Rooms('1')/$value"/>
            <m:properties>
                <d:Id>1</d:Id>
                <d:Seats>123</d:Seats>
            </m:properties>
        </entry>
    "#};
    let feed = feed_from_str(&feed_doc(body), &rooms(), &defaults()).unwrap();

    let entry = &feed.entries()[0];
    assert_eq!(entry.property("Id"), Some(&Value::String("1".into())));
    assert_eq!(entry.property("Seats"), Some(&Value::Int32(123)));
}
