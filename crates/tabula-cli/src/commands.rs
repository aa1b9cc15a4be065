//! `serve` and `rows` command handlers.

use std::io::Write;

use tabula_api::Server;
use tabula_core::{Record, Schema, TabulaConfig};
use tabula_storage::RowStore;

use crate::error::Result;

// ============================================================================
// serve
// ============================================================================

/// Run the HTTP server until Ctrl-C.
pub async fn run_serve(config: TabulaConfig) -> Result<()> {
    let server = Server::new(config)?;
    server.serve(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        // Without a signal handler, run until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

// ============================================================================
// rows
// ============================================================================

/// Print every stored record, as JSON or as an aligned table.
pub fn run_rows(config: &TabulaConfig, json: bool, out: &mut impl Write) -> Result<()> {
    config.validate()?;
    let store = RowStore::from_config(&config.store)?;
    let rows = store.load_all()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
    } else {
        write_table(store.schema(), &rows, out)?;
    }
    Ok(())
}

/// Write records as a left-aligned text table with a header row.
pub fn write_table(schema: &Schema, rows: &[Record], out: &mut impl Write) -> Result<()> {
    let mut widths: Vec<usize> = schema.fields().iter().map(|f| f.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.values()) {
            *width = (*width).max(value.chars().count());
        }
    }

    write_line(out, schema.fields(), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(out, &rule, &widths)?;
    for row in rows {
        write_line(out, row.values(), &widths)?;
    }

    if rows.is_empty() {
        writeln!(out, "(no entries)")?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())?;
    Ok(())
}
