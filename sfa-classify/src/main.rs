//! sfa-classify - table enrichment with OCLC Classify call numbers
//!
//! Reads a table, looks up each row's identifier with the classification
//! service and writes the table back out with an extra `OCLC-SFA` column.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use sfa_classify::cli::Args;
use sfa_classify::config::ClassifyConfig;
use sfa_classify::tabular::enrich_file;
use sfa_classify::LOG_TARGETS;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = sfa_common::config::load_config(args.config.as_deref())
        .context("Failed to load configuration file")?;
    let config = ClassifyConfig::resolve(&args.overrides(), &loaded.config)
        .context("Invalid configuration")?;

    sfa_common::logging::init_tracing(&config.log_level, LOG_TARGETS)
        .context("Failed to initialize logging")?;

    info!(
        "Starting sfa-classify {} (commit {}, built {}, {} profile)",
        env!("CARGO_PKG_VERSION"),
        env!("SFA_GIT_HASH"),
        env!("SFA_BUILD_DATE"),
        env!("SFA_BUILD_PROFILE"),
    );

    match &loaded.source {
        Some(path) => {
            info!("Configuration file: {}", path.display());
            match loaded.config.to_toml_string() {
                Ok(rendered) => debug!("Configuration file contents:\n{}", rendered),
                Err(e) => debug!(error = %e, "Could not render configuration file contents"),
            }
        }
        None => info!("No configuration file, using command line, environment and defaults"),
    }

    info!(
        base_url = %config.base_url,
        key_type = %config.key_type,
        max_attempts = config.retry.max_attempts(),
        retry_delay_ms = config.retry.delay().as_millis() as u64,
        concurrency = config.concurrency,
        "Classification settings"
    );

    let resolver = config
        .build_resolver()
        .context("Failed to create classification client")?;
    let options = args.enrich_options(&config);

    let summary = enrich_file(&resolver, &args.infile, &args.outfile, &options)
        .await
        .with_context(|| {
            format!(
                "Failed to enrich {} into {}",
                args.infile.display(),
                args.outfile.display()
            )
        })?;

    info!(
        "Resolved {} of {} rows ({} with an identifier) using column {}",
        summary.resolved, summary.rows, summary.queried, summary.column
    );

    Ok(())
}
