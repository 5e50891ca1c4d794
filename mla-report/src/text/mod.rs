//! Terminal report rendering
//!
//! Renders ASCII bar charts and centred comparison tables into any
//! `std::io::Write` sink, and assembles the full MLA terminal report.

pub mod bar_chart;
pub mod report;
pub mod table;

pub use bar_chart::{bar_length, render_bar_chart};
pub use report::{generate_full_report, render_full_report};
pub use table::{render_comparison_table, ComparisonRow, ComparisonTable, COLUMN_PADDING};
