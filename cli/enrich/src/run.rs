//! Main execution logic for sw-enrich CLI.

use anyhow::{Context, Result};
use std::time::Duration;
use sw_client::EnrichmentClient;
use sw_enricher::{
    EnrichConfig, Enricher, IdentifierFields, NdjsonSource, StatsSnapshot, StdoutDestination,
};
use sw_types::Credentials;
use tracing::{warn, Dispatch};

use crate::args::Cli;

/// Outcome of a CLI run.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: StatsSnapshot,
    pub invalid_lines: u64,
}

/// Execute an enrichment run with the provided arguments.
///
/// Client diagnostics go to `dispatch`.
pub async fn execute(args: Cli, dispatch: Dispatch) -> Result<RunSummary> {
    let config = build_config(&args)?;

    // Identifier misconfiguration is fatal before any input is read
    let selector = config.validate()?;
    let credentials = load_credentials(&args)?;

    let client = EnrichmentClient::new(config.client.clone(), &credentials, dispatch)?;
    let enricher = Enricher::new(client, selector);

    let mut source = NdjsonSource::new();
    let mut destination = StdoutDestination::new(config.output_format);
    let stats = enricher.run(&mut source, &mut destination).await?;

    let invalid_lines = source.invalid_lines();
    if invalid_lines > 0 {
        warn!(invalid_lines, "Some input lines were not JSON objects and were skipped");
    }

    Ok(RunSummary {
        stats,
        invalid_lines,
    })
}

/// Combine the config file, if any, with command-line overrides.
pub fn build_config(args: &Cli) -> Result<EnrichConfig> {
    let mut config = match &args.config {
        Some(path) => EnrichConfig::from_file(path)?,
        None => EnrichConfig::new(),
    };

    let overrides = IdentifierFields {
        ip: args.ip_field.clone(),
        object: args.object_field.clone(),
        hostname: args.hostname_field.clone(),
    };
    config.fields = config.fields.merge(overrides);

    if let Some(base_url) = &args.base_url {
        config.client = config.client.with_base_url(base_url);
    }
    if let Some(secs) = args.request_timeout {
        config.client = config.client.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = args.max_retries {
        config.client = config.client.with_max_retries(retries);
    }
    if let Some(format) = args.output_format {
        config.output_format = format.into();
    }

    Ok(config)
}

/// Load credentials from `--credentials-file` or the `SW_CREDENTIALS` blob.
pub fn load_credentials(args: &Cli) -> Result<Credentials> {
    match (&args.credentials_file, &args.credentials) {
        (Some(path), _) => Credentials::from_file(path)
            .with_context(|| format!("loading credentials from {}", path.display())),
        (None, Some(blob)) => Credentials::from_json(blob).context("decoding SW_CREDENTIALS"),
        (None, None) => anyhow::bail!(
            "no credentials configured; pass --credentials-file or set SW_CREDENTIALS"
        ),
    }
}
