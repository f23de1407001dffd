//! # SFA Common Library
//!
//! Shared code for the SFA classification tools:
//! - Error types
//! - TOML configuration loading
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
