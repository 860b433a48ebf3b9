//! Tests for standalone entry decoding.

use indoc::indoc;
use odata_atom::{ReadErrorKind, ReadProperties, entry_from_str};
use odata_edm::{ComplexType, EntityInfo, PropertyInfo, SimpleType, Value};

fn employees() -> EntityInfo {
    EntityInfo::new("Employees")
        .with_property(PropertyInfo::simple("EmployeeId", SimpleType::String))
        .with_property(PropertyInfo::simple("Age", SimpleType::Int32))
        .with_property(PropertyInfo::complex(
            "Location",
            ComplexType::new("RefScenario", "c_Location")
                .with_property(PropertyInfo::simple("Country", SimpleType::String)),
        ))
}

fn defaults() -> ReadProperties {
    ReadProperties::init()
}

fn entry_doc(body: &str) -> String {
    format!(
        concat!(
            r#"<entry xmlns="http://www.w3.org/2005/Atom""#,
            "\n",
            r#"       xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata""#,
            "\n",
            r#"       xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices">"#,
            "\n{}\n</entry>"
        ),
        body
    )
}

#[test]
fn entry_with_inline_properties() {
    let body = indoc! {r#"
        <id>http://host/service/Employees('1')</id>
        <title>Walter Winter</title>
        <updated>1999-01-01T00:00:00Z</updated>
        <category term="RefScenario.Employee"/>
        <link rel="edit" href="Employees('1')" title="Employee"/>
        <content type="application/xml">
            <m:properties>
                <d:EmployeeId>1</d:EmployeeId>
                <d:Age>52</d:Age>
                <d:Location>
                    <d:Country>Germany</d:Country>
                </d:Location>
            </m:properties>
        </content>
    "#};
    let entry = entry_from_str(&entry_doc(body), &employees(), &defaults()).unwrap();

    assert_eq!(entry.metadata().id(), Some("http://host/service/Employees('1')"));
    assert_eq!(entry.metadata().title(), Some("Walter Winter"));
    assert_eq!(entry.property("EmployeeId"), Some(&Value::String("1".into())));
    assert_eq!(entry.property("Age"), Some(&Value::Int32(52)));
    let location = entry.property("Location").unwrap().as_complex().unwrap();
    assert_eq!(location.get("Country"), Some(&Value::String("Germany".into())));
}

#[test]
fn null_property_inside_an_entry() {
    let body = indoc! {r#"
        <content type="application/xml">
            <m:properties>
                <d:EmployeeId>1</d:EmployeeId>
                <d:Age m:null="true"/>
            </m:properties>
        </content>
    "#};
    let entry = entry_from_str(&entry_doc(body), &employees(), &defaults()).unwrap();
    assert_eq!(entry.property("Age"), Some(&Value::Null));
}

#[test]
fn unknown_property_is_rejected() {
    let body = indoc! {r#"
        <content type="application/xml">
            <m:properties>
                <d:Salary>9999</d:Salary>
            </m:properties>
        </content>
    "#};
    let result = entry_from_str(&entry_doc(body), &employees(), &defaults());
    assert!(matches!(
        result.unwrap_err().kind(),
        ReadErrorKind::UnknownProperty { name } if name == "Salary"
    ));
}

#[test]
fn entry_without_properties() {
    let body = indoc! {r#"
        <id>http://host/service/Employees('1')</id>
        <link rel="self" href="Employees('1')"/>
    "#};
    let entry = entry_from_str(&entry_doc(body), &employees(), &defaults()).unwrap();
    assert!(entry.properties().is_empty());
    assert_eq!(entry.metadata().id(), Some("http://host/service/Employees('1')"));
}

#[test]
fn wrong_root_element_is_structural() {
    let xml = r#"<item xmlns="http://www.w3.org/2005/Atom"/>"#;
    let result = entry_from_str(xml, &employees(), &defaults());
    assert!(matches!(
        result.unwrap_err().kind(),
        ReadErrorKind::StructuralMismatch { .. }
    ));
}
