//! MLA Report CLI support
//!
//! Shared start-up code for the two report binaries:
//! - `mla-text-report` prints the terminal report to stdout
//! - `mla-charts` writes the four PNG charts to the fixed output directory
//!
//! Neither binary takes arguments, flags or environment variables.

use anyhow::{Context, Result};
use log::LevelFilter;
use mla_report::ChartConfig;
use std::io::{self, BufWriter, Write};

/// Log level for both binaries; stdout carries the report, stderr only problems
pub const LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Initialize logging with a fixed level
///
/// Uses `Builder::new()` rather than `from_env` so no environment variable
/// changes the output.
pub fn init_logging(level: LevelFilter) {
    use env_logger::Builder;

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Print the full terminal report to `out`
pub fn run_text_report<W: Write>(out: W) -> Result<()> {
    let mut out = BufWriter::new(out);
    mla_report::text::generate_full_report(&mut out).context("Failed to write text report")?;
    out.flush().context("Failed to flush text report")?;
    Ok(())
}

/// Render every chart into `config.output_dir`, confirming each on `out`
pub fn run_charts<W: Write>(config: &ChartConfig, out: &mut W) -> Result<()> {
    log::info!("Writing charts to {:?}", config.output_dir);
    let written = mla_report::charts::generate_all_charts(config, out)
        .with_context(|| format!("Failed to generate charts in {:?}", config.output_dir))?;
    log::debug!("{} charts written", written.len());
    Ok(())
}

/// Stdout handle for the binaries
pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}
