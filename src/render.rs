//! Formatting sinks for layout tables: ASCII grid, CSV, Markdown, and
//! AsciiDoc, with optional transposition. The sinks consume the cell records
//! produced by the query facade and own all presentation concerns.

use crate::query::{LayoutBlock, LayoutReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableFormat {
    #[default]
    Grid,
    Csv,
    Markdown,
    AsciiDoc,
}

impl TableFormat {
    /// Join for multiple entries sharing one table cell. CSV avoids embedded
    /// newlines because many viewers mishandle them; Markdown needs an HTML
    /// break to keep the entries inside the cell.
    fn cell_join(self) -> &'static str {
        match self {
            TableFormat::Csv => " ",
            TableFormat::Markdown => "<br />",
            TableFormat::Grid | TableFormat::AsciiDoc => "\n",
        }
    }
}

/// Renders a whole layout report: block labels followed by their tables.
pub fn render_report(report: &LayoutReport, format: TableFormat, transpose: bool) -> String {
    let mut out = String::new();
    for block in &report.blocks {
        if let Some(label) = &block.label {
            out.push_str(label);
            out.push('\n');
        }
        out.push_str(&render_block(block, format, transpose));
        out.push('\n');
    }
    out
}

fn render_block(block: &LayoutBlock, format: TableFormat, transpose: bool) -> String {
    let join = format.cell_join();
    let mut table: Vec<Vec<String>> = Vec::new();
    table.push(block.header.clone());
    for row in &block.rows {
        table.push(row.iter().map(|cell| cell.join(join)).collect());
    }
    if transpose {
        table = transposed(table);
    }
    match format {
        TableFormat::Grid => render_grid(&table),
        TableFormat::Csv => render_csv(&table),
        TableFormat::Markdown => render_markdown(&table),
        TableFormat::AsciiDoc => render_asciidoc(&table),
    }
}

fn transposed(table: Vec<Vec<String>>) -> Vec<Vec<String>> {
    if table.is_empty() {
        return table;
    }
    let cols = table.iter().map(|r| r.len()).max().unwrap_or(0);
    (0..cols)
        .map(|c| {
            table
                .iter()
                .map(|row| row.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

fn column_widths(table: &[Vec<String>]) -> Vec<usize> {
    let cols = table.iter().map(|r| r.len()).max().unwrap_or(0);
    (0..cols)
        .map(|c| {
            table
                .iter()
                .filter_map(|row| row.get(c))
                .flat_map(|cell| cell.lines())
                .map(str::len)
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn render_grid(table: &[Vec<String>]) -> String {
    let widths = column_widths(table);
    let rule = |fill: char| {
        let mut s = String::from("+");
        for &w in &widths {
            s.extend(std::iter::repeat(fill).take(w + 2));
            s.push('+');
        }
        s
    };
    let mut out = String::new();
    out.push_str(&rule('-'));
    out.push('\n');
    for (idx, row) in table.iter().enumerate() {
        let height = row.iter().map(|c| c.lines().count().max(1)).max().unwrap_or(1);
        for line_no in 0..height {
            out.push('|');
            for (c, &w) in widths.iter().enumerate() {
                let text = row
                    .get(c)
                    .and_then(|cell| cell.lines().nth(line_no))
                    .unwrap_or("");
                out.push_str(&format!(" {text:<w$} |"));
            }
            out.push('\n');
        }
        // Header separates from the body with a double rule.
        out.push_str(&rule(if idx == 0 { '=' } else { '-' }));
        out.push('\n');
    }
    out.trim_end().to_string()
}

fn render_csv(table: &[Vec<String>]) -> String {
    table
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_markdown(table: &[Vec<String>]) -> String {
    let widths = column_widths(table);
    let mut out = String::new();
    for (idx, row) in table.iter().enumerate() {
        out.push('|');
        for (c, &w) in widths.iter().enumerate() {
            let text = row.get(c).map(String::as_str).unwrap_or("");
            out.push_str(&format!(" {text:<w$} |"));
        }
        out.push('\n');
        if idx == 0 {
            out.push('|');
            for &w in &widths {
                out.push_str(&format!("{}|", "-".repeat(w + 2)));
            }
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}

fn render_asciidoc(table: &[Vec<String>]) -> String {
    let cols = table.iter().map(|r| r.len()).max().unwrap_or(0);
    let spec = vec!["<"; cols].join(",");
    let mut out = format!("[cols=\"{spec}\",options=\"header\"]\n|====\n");
    for row in table {
        out.push('|');
        out.push_str(&row.join(" |"));
        out.push('\n');
    }
    out.push_str("|====");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayoutBlock {
        LayoutBlock {
            label: Some("Block 0".to_string()),
            header: vec!["A[M][K]".to_string(), "0".to_string()],
            rows: vec![
                vec![vec!["0".to_string()], vec!["v0{0}".to_string()]],
                vec![
                    vec!["1".to_string()],
                    vec!["v0{1}".to_string(), "v0{17}".to_string()],
                ],
            ],
        }
    }

    fn report() -> LayoutReport {
        LayoutReport {
            blocks: vec![sample()],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_csv_join_and_shape() {
        let text = render_report(&report(), TableFormat::Csv, false);
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines[0], "Block 0");
        assert_eq!(lines[1], "A[M][K],0");
        assert_eq!(lines[2], "0,v0{0}");
        // Multiple entries in one cell are space-separated in CSV.
        assert_eq!(lines[3], "1,v0{1} v0{17}");
    }

    #[test]
    fn test_markdown_has_separator_and_breaks() {
        let text = render_report(&report(), TableFormat::Markdown, false);
        assert!(text.lines().nth(2).unwrap().starts_with("|--"));
        assert!(text.contains("v0{1}<br />v0{17}"));
    }

    #[test]
    fn test_grid_multiline_cells() {
        let text = render_report(&report(), TableFormat::Grid, false);
        assert!(text.contains("+="));
        // The two entries of the packed cell occupy two physical lines.
        assert!(text.contains("v0{1}"));
        assert!(text.contains("v0{17}"));
    }

    #[test]
    fn test_asciidoc_frame() {
        let text = render_report(&report(), TableFormat::AsciiDoc, false);
        assert!(text.starts_with("Block 0\n[cols=\"<,<\",options=\"header\"]"));
        assert!(text.contains("|===="));
    }

    #[test]
    fn test_transpose_swaps_axes() {
        let text = render_report(&report(), TableFormat::Csv, true);
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines[1], "A[M][K],0,1");
        assert_eq!(lines[2], "0,v0{0},v0{1} v0{17}");
    }
}
