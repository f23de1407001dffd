//! Classification services: HTTP client, retry wrapper and resolver

pub mod classify_client;
pub mod resilient_query;
pub mod resolver;
pub mod response_parser;

pub use classify_client::{ClassifyTransport, HttpClassifyClient};
pub use resilient_query::{ResilientQuery, RetryPolicy};
pub use resolver::Resolver;
pub use response_parser::parse_response;
