//! Centred comparison tables

use crate::config::TextLayout;
use crate::types::{ReportError, Result};
use std::fmt::Display;
use std::io::Write;

/// Extra width added to every column (one space either side of the cell)
pub const COLUMN_PADDING: usize = 2;

/// One table row, cells already coerced to their display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub cells: Vec<String>,
}

impl ComparisonRow {
    pub fn new<I, T>(cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        Self {
            cells: cells.into_iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Column headers plus rows of equal width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn new<I, T>(headers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        Self {
            headers: headers.into_iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder method: append a row
    pub fn with_row<I, T>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.rows.push(ComparisonRow::new(cells));
        self
    }

    /// Every row must have exactly one cell per header
    pub fn validate(&self) -> Result<()> {
        for (index, row) in self.rows.iter().enumerate() {
            if row.cells.len() != self.headers.len() {
                return Err(ReportError::RowWidthMismatch {
                    row: index,
                    expected: self.headers.len(),
                    actual: row.cells.len(),
                });
            }
        }
        Ok(())
    }

    /// Widest cell (header included) of each column, plus padding
    pub fn column_widths(&self) -> Result<Vec<usize>> {
        self.validate()?;
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .map(|row| row.cells[col].chars().count())
                    .fold(header.chars().count(), usize::max)
                    + COLUMN_PADDING
            })
            .collect();
        Ok(widths)
    }

    fn format_line(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            line.push_str(&format!(" {:^inner$} |", cell, inner = width - COLUMN_PADDING));
        }
        line
    }

    /// Rendered lines: header, separator, then one line per row
    pub fn lines(&self) -> Result<Vec<String>> {
        let widths = self.column_widths()?;
        let header = Self::format_line(&self.headers, &widths);
        let separator = "-".repeat(header.chars().count());

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(header);
        lines.push(separator);
        for row in &self.rows {
            lines.push(Self::format_line(&row.cells, &widths));
        }
        Ok(lines)
    }
}

/// Print `table` under a titled `=` banner, followed by a blank line
pub fn render_comparison_table<W: Write>(
    out: &mut W,
    title: &str,
    table: &ComparisonTable,
    layout: &TextLayout,
) -> Result<()> {
    let lines = table.lines()?;
    log::debug!(
        "Table '{}': {} columns, {} rows",
        title,
        table.headers.len(),
        table.rows.len()
    );

    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", layout.banner_rule())?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_table() -> ComparisonTable {
        ComparisonTable::new(["Length", "MHA", "MLA", "Rate"])
            .with_row(["4K tokens", "15.6", "1.95", "87.5%"])
            .with_row(["128K tokens", "499.2", "62.4", "87.5%"])
    }

    #[test]
    fn test_column_widths() {
        let table = memory_table();
        assert_eq!(table.column_widths().unwrap(), vec![13, 7, 6, 7]);
    }

    #[test]
    fn test_widths_cover_every_cell() {
        let table = memory_table().with_row(["x", "a much longer cell", "", "y"]);
        let widths = table.column_widths().unwrap();
        for (col, width) in widths.iter().enumerate() {
            assert!(*width >= table.headers[col].chars().count() + COLUMN_PADDING);
            for row in &table.rows {
                assert!(*width >= row.cells[col].chars().count() + COLUMN_PADDING);
            }
        }
    }

    #[test]
    fn test_separator_matches_header_length() {
        for table in [
            memory_table(),
            ComparisonTable::new(["序列长度", "传统MHA"]).with_row(["4K tokens", "15.6"]),
        ] {
            let lines = table.lines().unwrap();
            assert_eq!(lines[1].chars().count(), lines[0].chars().count());
            assert!(lines[1].chars().all(|c| c == '-'));
        }
    }

    #[test]
    fn test_cells_are_centred() {
        let lines = memory_table().lines().unwrap();
        assert_eq!(lines[0], "|   Length    |  MHA  | MLA  | Rate  |");
        assert_eq!(lines[2], "|  4K tokens  | 15.6  | 1.95 | 87.5% |");
        assert_eq!(lines[3], "| 128K tokens | 499.2 | 62.4 | 87.5% |");
    }

    #[test]
    fn test_numeric_cells_are_coerced() {
        let table = ComparisonTable::new(["n", "v"]).with_row([1.5, 20.0]);
        assert_eq!(table.rows[0].cells, vec!["1.5", "20"]);
    }

    #[test]
    fn test_row_width_mismatch() {
        let table = ComparisonTable::new(["a", "b"]).with_row(["only one"]);
        let err = table.column_widths().unwrap_err();
        assert!(matches!(
            err,
            ReportError::RowWidthMismatch { row: 0, expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_render_banner() {
        let mut buf = Vec::new();
        render_comparison_table(&mut buf, "Memory", &memory_table(), &TextLayout::default())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Memory");
        assert_eq!(lines[2], "=".repeat(80));
        assert_eq!(lines.len(), 3 + 4 + 1);
    }
}
