//! Element and attribute names of the Atom/OData wire format.

pub const ATOM_FEED: &str = "feed";
pub const ATOM_ENTRY: &str = "entry";
pub const ATOM_LINK: &str = "link";
pub const ATOM_ID: &str = "id";
pub const ATOM_TITLE: &str = "title";
pub const ATOM_UPDATED: &str = "updated";
pub const ATOM_CONTENT: &str = "content";
pub const ATOM_REL: &str = "rel";
pub const ATOM_HREF: &str = "href";
pub const ATOM_SRC: &str = "src";

/// `rel` value of the pagination continuation link.
pub const ATOM_NEXT_LINK: &str = "next";
/// `rel` value of the incremental-change continuation link.
pub const ATOM_DELTA_LINK: &str = "delta";

pub const M_PROPERTIES: &str = "properties";
pub const M_COUNT: &str = "count";
pub const M_NULL: &str = "null";
pub const M_TYPE: &str = "type";
pub const M_ETAG: &str = "etag";

/// The literal marking an explicit wire null.
pub const TRUE_LITERAL: &str = "true";
