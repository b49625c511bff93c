//! CLI command implementations.

pub mod cluster;
pub mod permissions;
pub mod scale;
pub mod summary;

use std::sync::Arc;

use anyhow::{Context, Result};
use happa_client::{HappaClient, MetricsCollector, ResponseCache};
use happa_config::Config;
use happa_core::{MachineTypeCatalog, SummaryContext, TracingReporter};

use crate::formatters::{Formatter, OutputFormat, get_formatter};

pub fn build_client_from_config(config: &Config) -> Result<HappaClient> {
    HappaClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .cache(ResponseCache::new())
        .build()
        .context("Failed to build management API client")
}

/// Client, machine-type catalog and reporter for the configured installation.
pub fn build_summary_context(config: &Config) -> Result<SummaryContext> {
    let client = build_client_from_config(config)?;
    let catalog = MachineTypeCatalog::for_provider(config.provider, &config.machine_types)
        .context("Failed to load machine types")?;

    Ok(SummaryContext::new(
        Arc::new(client),
        Arc::new(catalog),
        config.provider,
        Arc::new(TracingReporter),
    ))
}

pub fn formatter_for(output_format: &str) -> Result<Box<dyn Formatter>> {
    let format: OutputFormat = output_format.parse()?;
    Ok(get_formatter(format))
}
