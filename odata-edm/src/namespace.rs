//! Namespace URIs of the OData 2.0 Atom/XML wire format.

/// Primary data namespace: property elements live here.
pub const DATA_SERVICES: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices";

/// Metadata namespace: `m:properties`, `m:count`, the `m:null` and `m:type`
/// markers.
pub const METADATA: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices/metadata";

/// Atom Syndication Format namespace (RFC 4287): `feed`, `entry`, `link`.
pub const ATOM: &str = "http://www.w3.org/2005/Atom";

/// Separator between a type's namespace and its local name in qualified type
/// names such as `RefScenario.c_Location`.
pub const DELIMITER: &str = ".";
