//! Prints the MLA performance report to stdout

use anyhow::Result;
use mla_report_cli::{init_logging, run_text_report, stdout, LOG_LEVEL};

fn main() -> Result<()> {
    init_logging(LOG_LEVEL);
    log::info!("MLA text report v{}", mla_report::VERSION);

    run_text_report(stdout())
}
