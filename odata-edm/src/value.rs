//! The decoded value model.

use std::collections::HashMap;

use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A value decoded from the wire: a typed scalar, a nested name→value
/// mapping for complex properties, or an explicit null.
///
/// `Null` only arises from the wire null marker; an empty complex element
/// decodes to `Complex` with an empty map, which is a distinct value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit wire null (`m:null="true"`).
    Null,
    /// `Edm.Binary`, decoded from its base64 literal.
    Binary(Vec<u8>),
    /// `Edm.Boolean`.
    Boolean(bool),
    /// `Edm.Byte`.
    Byte(u8),
    /// `Edm.DateTime` (no offset).
    DateTime(DateTime),
    /// `Edm.DateTimeOffset`.
    DateTimeOffset(Timestamp),
    /// `Edm.Decimal`.
    Decimal(Decimal),
    /// `Edm.Double`.
    Double(f64),
    /// `Edm.Guid`.
    Guid(Uuid),
    /// `Edm.Int16`.
    Int16(i16),
    /// `Edm.Int32`.
    Int32(i32),
    /// `Edm.Int64`.
    Int64(i64),
    /// `Edm.SByte`.
    SByte(i8),
    /// `Edm.Single`.
    Single(f32),
    /// `Edm.String`.
    String(String),
    /// `Edm.Time`, a duration of day.
    Time(SignedDuration),
    /// A complex property: child name → child value.
    Complex(HashMap<String, Value>),
}

impl Value {
    /// Returns true for the explicit null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for complex values (including empty ones).
    pub fn is_complex(&self) -> bool {
        matches!(self, Value::Complex(_))
    }

    /// The child mapping of a complex value.
    pub fn as_complex(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Complex(map) => Some(map),
            _ => None,
        }
    }

    /// The string content of an `Edm.String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content of any integer value, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::SByte(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Complex(map)
    }
}
