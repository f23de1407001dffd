//! Command-line arguments
//!
//! Every tunable flag also reads an `SFA_*` environment variable; values
//! left unset fall through to the TOML file and then to built-in defaults.

use crate::config::{ClassifyConfig, ConfigOverrides};
use crate::tabular::{EnrichOptions, DEFAULT_COLUMN_POSITION};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for sfa-classify
#[derive(Parser, Debug)]
#[command(name = "sfa-classify")]
#[command(about = "Add OCLC Classify LCC call numbers (SFA) to a table of identifiers")]
#[command(version)]
pub struct Args {
    /// Input table
    #[arg(long, default_value = "./in.csv", env = "SFA_INFILE")]
    pub infile: PathBuf,

    /// Output table (input columns plus OCLC-SFA)
    #[arg(long, default_value = "./out.csv", env = "SFA_OUTFILE")]
    pub outfile: PathBuf,

    /// Header of the identifier column (overrides --colpos when it matches)
    #[arg(long, env = "SFA_COLNAME")]
    pub colname: Option<String>,

    /// Zero-based position of the identifier column
    #[arg(long, default_value_t = DEFAULT_COLUMN_POSITION, env = "SFA_COLPOS")]
    pub colpos: usize,

    /// Service parameter the identifiers are sent as (issn, isbn, oclc, ...)
    #[arg(long, env = "SFA_KEY_TYPE")]
    pub key_type: Option<String>,

    /// Field delimiter: a single character, or "tab"
    #[arg(long, default_value = ",", value_parser = parse_delimiter, env = "SFA_DELIMITER")]
    pub delimiter: u8,

    /// Classification service endpoint
    #[arg(long, env = "SFA_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SFA_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Attempts per query before giving up on transient responses
    #[arg(long, env = "SFA_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Delay between attempts in milliseconds
    #[arg(long, env = "SFA_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Rows resolved at once (output order is always preserved)
    #[arg(long, env = "SFA_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// TOML config file
    #[arg(long, value_name = "FILE", env = "SFA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SFA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            user_agent: None,
            max_attempts: self.max_attempts,
            retry_delay_ms: self.retry_delay_ms,
            concurrency: self.concurrency,
            key_type: self.key_type.clone(),
            log_level: self.log_level.clone(),
        }
    }

    pub fn enrich_options(&self, config: &ClassifyConfig) -> EnrichOptions {
        EnrichOptions {
            column_name: self.colname.clone(),
            column_position: self.colpos,
            key_type: config.key_type.clone(),
            delimiter: self.delimiter,
            concurrency: config.concurrency,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let bytes = value.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() && bytes[0] != b'"' && bytes[0] != b'\n' {
                Ok(bytes[0])
            } else {
                Err(format!(
                    "delimiter must be a single ASCII character or 'tab', got '{}'",
                    value
                ))
            }
        }
    }
}
