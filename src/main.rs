mod aggregator;
mod engine;
mod models;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::AnalysisEngine;
use crate::models::AnalysisReport;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sales-analyzer [input].csv [log_level:optional] [max_size_mib:optional] > [report].json");
        eprintln!("Writes the sales analysis report to stdout as JSON.");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Files larger than max_size_mib are rejected (default: 16)");
        exit(1);
    }

    let path = Path::new(&args[1]);
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let mut engine = AnalysisEngine::new();

    if let Some(max_size) = args.get(3) {
        engine = engine.with_max_payload(parse_max_payload(max_size)?);
    }

    let timer = Instant::now();
    let report = engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Analysed sales data in: {duration:?}");

    write_report_to_stdout(&report)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_max_payload(max_size_mib: &str) -> Result<u64> {
    let mebibytes: u64 = max_size_mib.parse()
        .map_err(|error| anyhow!("Invalid max size '{max_size_mib}': {error}"))?;

    mebibytes.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow!("Max size '{max_size_mib}' MiB is too large"))
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report is written to stdout, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &AnalysisReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, report)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
