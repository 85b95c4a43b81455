//! CLI argument definitions for sw-enrich.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
pub use sw_cli_common::LogLevel;

/// Enrich NDJSON records with Stairwell threat intelligence.
///
/// Exactly one identifier field must be configured, either here or in the
/// config file. Records without a value in that field pass through unchanged.
///
/// ## Examples
///
/// Enrich the `dest_host` field of every record:
///   cat events.jsonl | sw-enrich --hostname-field dest_host --credentials-file creds.json
///
/// Use a config file and pretty output:
///   sw-enrich -c enrich.yaml --output-format json < events.jsonl
#[derive(Parser, Debug)]
#[command(name = "sw-enrich")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Identifier ===
    /// Record field holding an IP address
    #[arg(long, env = "SW_IP_FIELD")]
    pub ip_field: Option<String>,

    /// Record field holding a file hash
    #[arg(long, env = "SW_OBJECT_FIELD")]
    pub object_field: Option<String>,

    /// Record field holding a hostname
    #[arg(long, env = "SW_HOSTNAME_FIELD")]
    pub hostname_field: Option<String>,

    // === Configuration ===
    /// YAML config file; flags override its values
    #[arg(short = 'c', long, env = "SW_CONFIG")]
    pub config: Option<PathBuf>,

    // === Credentials ===
    /// File holding the credential JSON blob
    #[arg(long, env = "SW_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Credential JSON blob
    #[arg(long, env = "SW_CREDENTIALS", hide = true, hide_env_values = true)]
    pub credentials: Option<String>,

    // === Client ===
    /// Base URL of the Stairwell service
    #[arg(long, env = "SW_BASE_URL")]
    pub base_url: Option<String>,

    /// Timeout for each HTTP attempt in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: Option<u64>,

    /// Retries allowed after the first attempt of a lookup
    #[arg(long)]
    pub max_retries: Option<u32>,

    // === Output ===
    /// Output format
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Output format for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    Jsonl,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for sw_enricher::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Jsonl => sw_enricher::OutputFormat::Jsonl,
            OutputFormat::Json => sw_enricher::OutputFormat::Json,
        }
    }
}
