//! Entity Data Model views for OData 2.0 consumers.
//!
//! This crate provides the read-only schema descriptions a wire-format
//! consumer is driven by: simple types with their literal grammar
//! ([`SimpleType`]), per-property constraints ([`Facets`]), property and
//! entity views ([`PropertyInfo`], [`ComplexType`], [`EntityInfo`]), the
//! decoded value model ([`Value`]) and the optional host-side type-mapping
//! tree ([`TypeMapping`]).
//!
//! The views are plain owned data: callers build them once (from their own
//! metadata source) and lend them to a consumer for the duration of a single
//! decode call. Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```
//! use odata_edm::{PropertyInfo, SimpleType, Value};
//!
//! let age = PropertyInfo::simple("Age", SimpleType::Int32);
//! assert!(!age.is_complex());
//!
//! let value = SimpleType::Int32.value_of_string("67", None, None).unwrap();
//! assert_eq!(value, Value::Int32(67));
//! ```

#![deny(unsafe_code)]

mod error;
mod facets;
mod mapping;
mod property;
mod simple_type;
mod value;

pub mod namespace;

pub use error::ConvertError;
pub use facets::Facets;
pub use mapping::{Target, TypeMapping};
pub use property::{ComplexType, EntityInfo, PropertyInfo, PropertyKind};
pub use simple_type::SimpleType;
pub use value::Value;
