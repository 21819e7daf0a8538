//! Render dispatch
//!
//! Looks up the concrete type of a value in an [`OutputRegistry`] and hands it to
//! the matching handler. Values with no handler are written as indented JSON.

use super::registry::{OutputRegistry, RegistryKey, RenderFn};
use crate::error::OutputError;
use serde::Serialize;
use std::any::Any;
use std::io::Write;
use tracing::debug;

/// A value the output layer can dispatch on and serialize.
pub trait Renderable: Any {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;

    fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Write the value as JSON, indented when `pretty` is set.
    fn write_json(&self, out: &mut dyn Write, pretty: bool) -> Result<(), serde_json::Error>;
}

impl<T: Any + Serialize> Renderable for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn write_json(&self, out: &mut dyn Write, pretty: bool) -> Result<(), serde_json::Error> {
        if pretty {
            serde_json::to_writer_pretty(out, self)
        } else {
            serde_json::to_writer(out, self)
        }
    }
}

fn key_of(value: &dyn Renderable) -> RegistryKey {
    RegistryKey::from_parts(value.as_any().type_id(), value.type_name())
}

/// Dispatch through `registry`, writing the JSON fallback to `out`.
///
/// Direct handlers take precedence over rows handlers. A rows handler that
/// fails never reaches `render`.
pub fn render_with_fallback(
    registry: &OutputRegistry,
    value: Option<&dyn Renderable>,
    render: &mut RenderFn<'_>,
    out: &mut dyn Write,
) -> Result<(), OutputError> {
    let Some(value) = value else {
        writeln!(out, "null")?;
        return Ok(());
    };

    let key = key_of(value);
    if let Some(handler) = registry.direct_handler(&key) {
        debug!(type_name = %key, "Rendering with direct handler");
        return handler(value.as_any(), render);
    }

    if let Some(handler) = registry.rows_handler(&key) {
        debug!(type_name = %key, "Rendering with rows handler");
        let (headers, rows) = handler(value.as_any())?;
        render(&headers, &rows);
        return Ok(());
    }

    debug!(type_name = %key, "No output handler registered, writing JSON");
    value.write_json(out, true)?;
    writeln!(out)?;
    Ok(())
}

/// Dispatch through the process-wide registry, writing the JSON fallback to stdout.
pub fn render_by_registry(
    value: Option<&dyn Renderable>,
    render: &mut RenderFn<'_>,
) -> Result<(), OutputError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_with_fallback(super::registry(), value, render, &mut out)
}
