//! sw-enrich CLI
//!
//! Reads NDJSON records from stdin, enriches each one with Stairwell
//! threat intelligence, and writes them to stdout in the same order.

use clap::Parser;
use sw_cli_common::{format_number, init_logging};

mod args;
mod run;

use args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only records
    let dispatch = init_logging(args.log_level)?;

    let summary = run::execute(args, dispatch).await?;
    let stats = &summary.stats;

    eprintln!();
    eprintln!("Enrichment completed:");
    eprintln!("  Records seen:     {}", format_number(stats.records_seen));
    eprintln!("  Records enriched: {}", format_number(stats.records_enriched));
    eprintln!("  Records failed:   {}", format_number(stats.records_failed));
    eprintln!("  Records skipped:  {}", format_number(stats.records_skipped));
    if summary.invalid_lines > 0 {
        eprintln!("  Invalid lines:    {}", format_number(summary.invalid_lines));
    }
    eprintln!(
        "  Duration:         {:.2}s",
        stats.duration().num_milliseconds() as f64 / 1000.0
    );
    if let Some(rps) = stats.records_per_second() {
        eprintln!("  Throughput:       {:.1} records/sec", rps);
    }
    if stats.records_failed > 0 {
        eprintln!(
            "  Errors:           {} transient, {} permanent",
            stats.transient_errors, stats.permanent_errors
        );
    }

    Ok(())
}
