//! Writes the MLA comparison charts to the fixed output directory

use anyhow::Result;
use mla_report::ChartConfig;
use mla_report_cli::{init_logging, run_charts, stdout, LOG_LEVEL};

fn main() -> Result<()> {
    init_logging(LOG_LEVEL);
    log::info!("MLA charts v{}", mla_report::VERSION);

    let config = ChartConfig::default();
    run_charts(&config, &mut stdout())
}
