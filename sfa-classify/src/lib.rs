//! sfa-classify library interface
//!
//! Looks up LCC call-number fragments (SFA) from the OCLC Classify service
//! and appends them to a table of identifiers.

pub mod cli;
pub mod config;
pub mod error;
pub mod services;
pub mod tabular;
pub mod types;

pub use crate::error::{ClassifyError, ClassifyResult};
pub use crate::services::{ClassifyTransport, HttpClassifyClient, Resolver, RetryPolicy};
pub use crate::types::{ClassificationResponse, KeyType, QueryKey, ResponseStatus, WorkCandidate};

/// Crate targets whose log level follows the configured level
pub const LOG_TARGETS: &[&str] = &["sfa_classify", "sfa_common"];
