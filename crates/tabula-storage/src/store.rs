//! Append-only row store.
//!
//! The backing file is created lazily: the header row is written the first
//! time the file is found absent or empty. Every append writes exactly one
//! row in schema order, so an existing header must name the schema fields
//! in that order (ASCII case is ignored, as in the loader). Appends, header initialization and full loads are
//! serialized by an in-process lock, so concurrent requests in one process
//! never interleave partial rows. Other processes writing the same file are
//! not coordinated.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tabula_core::{Record, Schema, StoreConfig};

use crate::error::{Error, Result};
use crate::loader;

/// Append-only CSV store with a fixed header.
#[derive(Debug)]
pub struct RowStore {
    path: PathBuf,
    schema: Schema,
    delimiter: u8,
    lock: Mutex<()>,
}

impl RowStore {
    /// Create a store over `path` with the given schema and a `,` delimiter.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            path: path.into(),
            schema,
            delimiter: b',',
            lock: Mutex::new(()),
        }
    }

    /// Use a different column delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Build a store from the `[store]` config section.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(config.path.clone(), config.schema()?).with_delimiter(config.delimiter_byte()?))
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Field set of this store.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Column delimiter byte.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Write the header row if the file is absent, empty, or starts with an
    /// all-blank line (the same files the loader reads as holding nothing).
    ///
    /// Returns `true` if the header was written by this call. A file with a
    /// usable header is never touched, so calling this before every write
    /// is safe.
    pub fn ensure_initialized(&self) -> Result<bool> {
        let _guard = self.lock();
        self.initialize_locked()
    }

    /// Append one record built from `field → value` pairs.
    ///
    /// Values are trimmed and absent fields are written as empty strings.
    /// Keys outside the schema are ignored. Returns the record as stored.
    ///
    /// Fails with [`Error::SchemaMismatch`] if an existing file was created
    /// with a different header.
    pub fn append<I, K, V>(&self, values: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let record = self.schema.record(values);

        let _guard = self.lock();
        if !self.initialize_locked()? {
            self.check_header()?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(e, &self.path))?;
        if !ends_with_newline(&mut file).map_err(|e| Error::io(e, &self.path))? {
            file.write_all(b"\n").map_err(|e| Error::io(e, &self.path))?;
        }

        let mut writer = self.writer(file);
        writer.write_record(record.values())?;
        writer.flush().map_err(|e| Error::io(e, &self.path))?;

        log::debug!("appended row to {}", self.path.display());
        Ok(record)
    }

    /// Read every record in insertion order.
    ///
    /// An absent or empty file yields an empty list, never an error.
    /// Malformed rows are skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        let _guard = self.lock();
        loader::load_file(&self.path, &self.schema, self.delimiter)
    }

    fn initialize_locked(&self) -> Result<bool> {
        if !loader::needs_header(&self.path, self.delimiter)? {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(e, parent))?;
        }

        let file = File::create(&self.path).map_err(|e| Error::io(e, &self.path))?;
        let mut writer = self.writer(file);
        writer.write_record(self.schema.fields())?;
        writer.flush().map_err(|e| Error::io(e, &self.path))?;

        log::info!(
            "initialized {} with header {:?}",
            self.path.display(),
            self.schema.fields()
        );
        Ok(true)
    }

    fn check_header(&self) -> Result<()> {
        let found = loader::read_header(&self.path, self.delimiter)?;
        let fields = self.schema.fields();
        if found.len() == fields.len()
            && found
                .iter()
                .zip(fields)
                .all(|(h, f)| loader::header_matches(h, f))
        {
            return Ok(());
        }
        Err(Error::SchemaMismatch {
            path: self.path.clone(),
            expected: self.schema.fields().to_vec(),
            found,
        })
    }

    fn writer(&self, file: File) -> csv::Writer<File> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(file)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whether a non-empty file already ends in a line break.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

// ============================================================================
// Tests
// ============================================================================
