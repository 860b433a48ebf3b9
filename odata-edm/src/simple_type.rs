//! EDM simple types and their literal grammar.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ConvertError;
use crate::Facets;
use crate::Target;
use crate::Value;

/// The EDM simple types of OData 2.0.
///
/// Each type defines a textual literal grammar for XML element content;
/// [`SimpleType::value_of_string`] is the scalar converter turning such a
/// literal into a typed [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleType {
    /// Base64-encoded bytes.
    Binary,
    /// `true` / `false` (also `1` / `0`).
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// ISO 8601 date-time without offset, e.g. `2012-02-29T13:33:27`.
    DateTime,
    /// ISO 8601 date-time with offset, e.g. `2009-12-12T12:00:00Z`.
    DateTimeOffset,
    /// Arbitrary-precision decimal.
    Decimal,
    /// 64-bit IEEE float; `INF`, `-INF` and `NaN` literals are accepted.
    Double,
    /// RFC 4122 UUID.
    Guid,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Signed 8-bit integer.
    SByte,
    /// 32-bit IEEE float; `INF`, `-INF` and `NaN` literals are accepted.
    Single,
    /// Unicode text, taken verbatim.
    String,
    /// Duration of day as an ISO 8601 duration, e.g. `PT16H21M32S`.
    Time,
}

impl SimpleType {
    /// The qualified `Edm.*` type name.
    pub fn name(self) -> &'static str {
        match self {
            SimpleType::Binary => "Edm.Binary",
            SimpleType::Boolean => "Edm.Boolean",
            SimpleType::Byte => "Edm.Byte",
            SimpleType::DateTime => "Edm.DateTime",
            SimpleType::DateTimeOffset => "Edm.DateTimeOffset",
            SimpleType::Decimal => "Edm.Decimal",
            SimpleType::Double => "Edm.Double",
            SimpleType::Guid => "Edm.Guid",
            SimpleType::Int16 => "Edm.Int16",
            SimpleType::Int32 => "Edm.Int32",
            SimpleType::Int64 => "Edm.Int64",
            SimpleType::SByte => "Edm.SByte",
            SimpleType::Single => "Edm.Single",
            SimpleType::String => "Edm.String",
            SimpleType::Time => "Edm.Time",
        }
    }

    /// Convert a wire literal into a typed value.
    ///
    /// Enforces the type's literal grammar and the `max_length` facet, then
    /// applies the optional conversion target. Deterministic for identical
    /// inputs.
    pub fn value_of_string(
        self,
        literal: &str,
        facets: Option<&Facets>,
        target: Option<Target>,
    ) -> Result<Value, ConvertError> {
        let value = self.parse_literal(literal)?;
        if let Some(facets) = facets {
            self.check_facets(&value, literal, facets)?;
        }
        match target {
            None => Ok(value),
            Some(target) => self.apply_target(value, literal, target),
        }
    }

    fn parse_literal(self, literal: &str) -> Result<Value, ConvertError> {
        let invalid = || ConvertError::InvalidLiteral {
            type_name: self.name(),
            literal: literal.to_owned(),
        };

        match self {
            SimpleType::Binary => BASE64
                .decode(literal)
                .map(Value::Binary)
                .map_err(|_| invalid()),
            SimpleType::Boolean => match literal {
                "true" | "1" => Ok(Value::Boolean(true)),
                "false" | "0" => Ok(Value::Boolean(false)),
                _ => Err(invalid()),
            },
            SimpleType::Byte => literal.parse::<u8>().map(Value::Byte).map_err(|_| invalid()),
            SimpleType::DateTime => literal
                .parse::<DateTime>()
                .map(Value::DateTime)
                .map_err(|_| invalid()),
            SimpleType::DateTimeOffset => literal
                .parse::<Timestamp>()
                .map(Value::DateTimeOffset)
                .map_err(|_| invalid()),
            SimpleType::Decimal => literal
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| invalid()),
            SimpleType::Double => match literal {
                "INF" => Ok(Value::Double(f64::INFINITY)),
                "-INF" => Ok(Value::Double(f64::NEG_INFINITY)),
                "NaN" => Ok(Value::Double(f64::NAN)),
                _ => literal.parse::<f64>().map(Value::Double).map_err(|_| invalid()),
            },
            SimpleType::Guid => Uuid::parse_str(literal).map(Value::Guid).map_err(|_| invalid()),
            SimpleType::Int16 => literal.parse::<i16>().map(Value::Int16).map_err(|_| invalid()),
            SimpleType::Int32 => literal.parse::<i32>().map(Value::Int32).map_err(|_| invalid()),
            SimpleType::Int64 => literal.parse::<i64>().map(Value::Int64).map_err(|_| invalid()),
            SimpleType::SByte => literal.parse::<i8>().map(Value::SByte).map_err(|_| invalid()),
            SimpleType::Single => match literal {
                "INF" => Ok(Value::Single(f32::INFINITY)),
                "-INF" => Ok(Value::Single(f32::NEG_INFINITY)),
                "NaN" => Ok(Value::Single(f32::NAN)),
                _ => literal.parse::<f32>().map(Value::Single).map_err(|_| invalid()),
            },
            SimpleType::String => Ok(Value::String(literal.to_owned())),
            SimpleType::Time => literal
                .parse::<SignedDuration>()
                .map(Value::Time)
                .map_err(|_| invalid()),
        }
    }

    fn check_facets(
        self,
        value: &Value,
        literal: &str,
        facets: &Facets,
    ) -> Result<(), ConvertError> {
        let Some(max_length) = facets.max_length() else {
            return Ok(());
        };
        let length = match value {
            Value::String(s) => s.chars().count(),
            Value::Binary(b) => b.len(),
            _ => return Ok(()),
        };
        if length > max_length as usize {
            return Err(ConvertError::FacetViolation {
                type_name: self.name(),
                literal: literal.to_owned(),
                constraint: format!("MaxLength({max_length})"),
            });
        }
        Ok(())
    }

    fn apply_target(
        self,
        value: Value,
        literal: &str,
        target: Target,
    ) -> Result<Value, ConvertError> {
        let unsupported = || ConvertError::UnsupportedTarget {
            type_name: self.name(),
            target,
        };

        match target {
            Target::Int64 => match value {
                Value::Byte(v) => Ok(Value::Int64(i64::from(v))),
                Value::SByte(v) => Ok(Value::Int64(i64::from(v))),
                Value::Int16(v) => Ok(Value::Int64(i64::from(v))),
                Value::Int32(v) => Ok(Value::Int64(i64::from(v))),
                Value::Int64(v) => Ok(Value::Int64(v)),
                _ => Err(unsupported()),
            },
            Target::Double => match value {
                Value::Byte(v) => Ok(Value::Double(f64::from(v))),
                Value::SByte(v) => Ok(Value::Double(f64::from(v))),
                Value::Int16(v) => Ok(Value::Double(f64::from(v))),
                Value::Int32(v) => Ok(Value::Double(f64::from(v))),
                Value::Int64(v) => Ok(Value::Double(v as f64)),
                Value::Single(v) => Ok(Value::Double(f64::from(v))),
                Value::Double(v) => Ok(Value::Double(v)),
                _ => Err(unsupported()),
            },
            Target::Text => Ok(Value::String(literal.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals() {
        assert_eq!(
            SimpleType::Int32.value_of_string("67", None, None),
            Ok(Value::Int32(67))
        );
        assert_eq!(
            SimpleType::Int16.value_of_string("-32768", None, None),
            Ok(Value::Int16(i16::MIN))
        );
        assert_eq!(
            SimpleType::Byte.value_of_string("255", None, None),
            Ok(Value::Byte(255))
        );
    }

    #[test]
    fn integer_overflow_is_invalid() {
        let err = SimpleType::Int16.value_of_string("40000", None, None).unwrap_err();
        assert_eq!(
            err,
            ConvertError::InvalidLiteral {
                type_name: "Edm.Int16",
                literal: "40000".into()
            }
        );
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(
            SimpleType::Boolean.value_of_string("true", None, None),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            SimpleType::Boolean.value_of_string("0", None, None),
            Ok(Value::Boolean(false))
        );
        assert!(SimpleType::Boolean.value_of_string("TRUE", None, None).is_err());
    }

    #[test]
    fn float_special_literals() {
        assert_eq!(
            SimpleType::Double.value_of_string("-INF", None, None),
            Ok(Value::Double(f64::NEG_INFINITY))
        );
        let nan = SimpleType::Single.value_of_string("NaN", None, None).unwrap();
        assert!(matches!(nan, Value::Single(v) if v.is_nan()));
    }

    #[test]
    fn date_time_literals() {
        let value = SimpleType::DateTime
            .value_of_string("2012-02-29T13:33:27", None, None)
            .unwrap();
        assert_eq!(
            value,
            Value::DateTime(jiff::civil::datetime(2012, 2, 29, 13, 33, 27, 0))
        );

        assert!(
            SimpleType::DateTimeOffset
                .value_of_string("2009-12-12T12:00:00Z", None, None)
                .is_ok()
        );
        // An offset-free literal is not a valid DateTimeOffset.
        assert!(
            SimpleType::DateTimeOffset
                .value_of_string("2009-12-12T12:00:00", None, None)
                .is_err()
        );
    }

    #[test]
    fn time_literal_is_a_duration_of_day() {
        let value = SimpleType::Time.value_of_string("PT16H21M32S", None, None).unwrap();
        assert_eq!(
            value,
            Value::Time(SignedDuration::from_secs((16 * 60 + 21) * 60 + 32))
        );
    }

    #[test]
    fn guid_literal() {
        let value = SimpleType::Guid
            .value_of_string("aabbccdd-aabb-ccdd-eeff-aabbccddeeff", None, None)
            .unwrap();
        assert_eq!(
            value,
            Value::Guid(Uuid::parse_str("aabbccdd-aabb-ccdd-eeff-aabbccddeeff").unwrap())
        );
    }

    #[test]
    fn binary_literal_is_base64() {
        assert_eq!(
            SimpleType::Binary.value_of_string("AQID", None, None),
            Ok(Value::Binary(vec![1, 2, 3]))
        );
        assert!(SimpleType::Binary.value_of_string("not base64!", None, None).is_err());
    }

    #[test]
    fn max_length_facet() {
        let facets = Facets::new().with_max_length(3);
        assert_eq!(
            SimpleType::String.value_of_string("abc", Some(&facets), None),
            Ok(Value::String("abc".into()))
        );
        let err = SimpleType::String
            .value_of_string("abcd", Some(&facets), None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::FacetViolation { constraint, .. }
            if constraint == "MaxLength(3)"));
    }

    #[test]
    fn target_widening() {
        assert_eq!(
            SimpleType::Int32.value_of_string("67", None, Some(Target::Int64)),
            Ok(Value::Int64(67))
        );
        assert_eq!(
            SimpleType::Int16.value_of_string("7", None, Some(Target::Double)),
            Ok(Value::Double(7.0))
        );
        assert_eq!(
            SimpleType::Int32.value_of_string("67", None, Some(Target::Text)),
            Ok(Value::String("67".into()))
        );
    }

    #[test]
    fn target_mismatch_is_rejected() {
        let err = SimpleType::String
            .value_of_string("abc", None, Some(Target::Int64))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedTarget {
                type_name: "Edm.String",
                target: Target::Int64
            }
        );
    }
}
