//! Table writers behind the render callback.
//!
//! A [`TableSink`] collects every table a handler emits into one string, so
//! direct handlers that render several sections produce them in order.

use super::format::escape_markdown;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Box-drawn table via comfy-table.
    Table,
    /// GitHub-flavored markdown table.
    Markdown,
}

#[derive(Debug)]
pub struct TableSink {
    style: TableStyle,
    out: String,
    tables: usize,
}

impl TableSink {
    pub fn new(style: TableStyle) -> Self {
        Self {
            style,
            out: String::new(),
            tables: 0,
        }
    }

    /// Append one table. Tables after the first are separated by a blank line.
    pub fn push(&mut self, headers: &[String], rows: &[Vec<String>]) {
        if self.tables > 0 {
            self.out.push('\n');
        }
        let rendered = match self.style {
            TableStyle::Table => render_table(headers, rows),
            TableStyle::Markdown => render_markdown(headers, rows),
        };
        self.out.push_str(&rendered);
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.tables += 1;
    }

    pub fn tables(&self) -> usize {
        self.tables
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}

pub fn render_markdown(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&markdown_line(headers.iter().map(|h| escape_markdown(h))));
    out.push_str(&markdown_line(headers.iter().map(|_| "---".to_string())));
    for row in rows {
        out.push_str(&markdown_line(row.iter().map(|cell| escape_markdown(cell))));
    }
    out
}

fn markdown_line(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.collect();
    format!("| {} |\n", cells.join(" | "))
}
