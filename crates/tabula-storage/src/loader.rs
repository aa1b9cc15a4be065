//! Table loader: reads the whole backing file into records.
//!
//! Columns are matched to schema fields by header name, so a file whose
//! columns were reordered still loads. A schema field with no matching
//! column reads as `""`. Rows whose column count differs from the header,
//! or that cannot be decoded, are skipped with a warning.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tabula_core::{Record, Schema};

use crate::error::{Error, Result};

/// Returns `true` if `path` does not exist or has zero length.
pub fn is_missing_or_empty(path: &Path) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(Error::io(e, path)),
    }
}

/// Read only the header row of `path`, trimmed.
pub fn read_header(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(e, path))?;
    let mut reader = reader_builder(delimiter).from_reader(file);
    Ok(trimmed(reader.headers()?))
}

/// Returns `true` if `path` has no usable header row: absent, empty, or a
/// first record whose cells are all blank.
pub fn needs_header(path: &Path, delimiter: u8) -> Result<bool> {
    if is_missing_or_empty(path)? {
        return Ok(true);
    }
    Ok(is_blank_header(&read_header(path, delimiter)?))
}

/// Whether a header field and a schema field name the same column.
pub fn header_matches(header: &str, field: &str) -> bool {
    header.eq_ignore_ascii_case(field)
}

/// Load every well-formed row of `path`; missing or empty files yield none.
pub fn load_file(path: &Path, schema: &Schema, delimiter: u8) -> Result<Vec<Record>> {
    if is_missing_or_empty(path)? {
        return Ok(Vec::new());
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(e, path)),
    };
    let records = load_records(file, schema, delimiter, path)?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Decode records from any reader. `source` is only used in log lines.
pub fn load_records<R: Read>(
    input: R,
    schema: &Schema,
    delimiter: u8,
    source: &Path,
) -> Result<Vec<Record>> {
    let mut reader = reader_builder(delimiter).from_reader(input);
    let header = trimmed(reader.headers()?);
    if is_blank_header(&header) {
        return Ok(Vec::new());
    }

    let columns: Vec<Option<usize>> = schema
        .fields()
        .iter()
        .map(|field| {
            header
                .iter()
                .position(|h| h == field)
                .or_else(|| header.iter().position(|h| header_matches(h, field)))
        })
        .collect();
    for (field, column) in schema.fields().iter().zip(&columns) {
        if column.is_none() {
            log::warn!(
                "{} has no '{field}' column; reading it as empty",
                source.display()
            );
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log::warn!("skipping unreadable row in {}: {e}", source.display());
                continue;
            }
        };
        if row.len() != header.len() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            log::warn!(
                "skipping malformed row at {}:{line}: expected {} columns, found {}",
                source.display(),
                header.len(),
                row.len()
            );
            continue;
        }
        let values = schema
            .fields()
            .iter()
            .zip(&columns)
            .map(|(field, column)| (field.as_str(), column.and_then(|c| row.get(c)).unwrap_or("")));
        records.push(schema.record(values));
    }
    Ok(records)
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(delimiter).has_headers(true).flexible(true);
    builder
}

fn is_blank_header(header: &[String]) -> bool {
    header.iter().all(String::is_empty)
}

fn trimmed(header: &csv::StringRecord) -> Vec<String> {
    header.iter().map(|h| h.trim().to_string()).collect()
}

// ============================================================================
// Tests
// ============================================================================
