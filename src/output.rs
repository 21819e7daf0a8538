//! Output layer
//!
//! Command results are written as JSON by default. Table and markdown output go
//! through the [`OutputRegistry`]: each response type registers a function that
//! turns it into headers and rows, and [`dispatch`] routes a value to its handler
//! by concrete type. Types with no handler fall back to indented JSON.

pub mod adapters;
pub mod dispatch;
pub mod format;
pub mod registry;
pub mod render;
pub mod rows;

pub use dispatch::{render_by_registry, render_with_fallback, Renderable};
pub use registry::{Headers, OutputRegistry, RegistryKey, RenderFn, Rows};
pub use render::{TableSink, TableStyle};

use crate::error::OutputError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

static REGISTRY: Lazy<OutputRegistry> = Lazy::new(OutputRegistry::builtin);

/// The process-wide registry, built on first use and never mutated afterwards.
pub fn registry() -> &'static OutputRegistry {
    &REGISTRY
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Markdown => "markdown",
        }
    }

    fn table_style(&self) -> Option<TableStyle> {
        match self {
            OutputFormat::Json => None,
            OutputFormat::Table => Some(TableStyle::Table),
            OutputFormat::Markdown => Some(TableStyle::Markdown),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(OutputError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write `value` in `format` using the process-wide registry.
pub fn print_output(
    value: &dyn Renderable,
    format: OutputFormat,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<(), OutputError> {
    print_output_with(registry(), value, format, pretty, out)
}

/// Write `value` in `format`, dispatching table output through `registry`.
pub fn print_output_with(
    registry: &OutputRegistry,
    value: &dyn Renderable,
    format: OutputFormat,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<(), OutputError> {
    if pretty && format != OutputFormat::Json {
        return Err(OutputError::PrettyRequiresJson);
    }

    let Some(style) = format.table_style() else {
        value.write_json(out, pretty)?;
        writeln!(out)?;
        return Ok(());
    };

    let mut sink = TableSink::new(style);
    let mut fallback = Vec::new();
    render_with_fallback(
        registry,
        Some(value),
        &mut |headers: &[String], rows: &[Vec<String>]| sink.push(headers, rows),
        &mut fallback,
    )?;
    out.write_all(sink.into_string().as_bytes())?;
    out.write_all(&fallback)?;
    out.flush()?;
    Ok(())
}
