//! Tabular input/output
//!
//! Row 0 is the header. One column holds the identifiers; every row is
//! copied to the output with one extra trailing cell holding the resolved
//! call number (`OCLC-SFA` on the header row).

pub mod column;
pub mod csv_driver;

pub use column::select_column;
pub use csv_driver::{enrich, enrich_file, EnrichOptions, EnrichmentSummary};

/// Header label of the appended column
pub const OUTPUT_COLUMN_LABEL: &str = "OCLC-SFA";

/// Column used when no header name is given or none matches
pub const DEFAULT_COLUMN_POSITION: usize = 2;
