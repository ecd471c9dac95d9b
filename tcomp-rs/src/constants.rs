//! Constants used throughout the comparator.

/// Element name whose entries are indexed and compared.
pub const ENTRY_TAG: &str = "t";

/// Attribute carrying the entry id.
pub const ID_ATTR: &str = "id";

/// Texts at or above this length (in characters) are rendered as a
/// character diff instead of side by side in the visual report.
pub const SIDE_BY_SIDE_LIMIT: usize = 50;

/// Header row of a CSV export.
pub const CSV_HEADER: &str = "ID,Type,Text";
