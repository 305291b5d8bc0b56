// src/fs/mod.rs

pub mod walk;

pub use walk::{walk, walk_files, Entry, Walk};

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use std::{fs, path::Path};
use tracing::{debug, instrument};

use crate::csv::{self, CsvFormat, Table};
use crate::encoding;

/// Read a file's entire contents as raw bytes. An empty file is not an
/// error.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let bytes = fs::read(&path)
        .with_context(|| format!("failed to read file {:?}", path.as_ref()))?;
    if bytes.is_empty() {
        debug!(path = %path.as_ref().display(), "file is empty");
    }
    Ok(bytes)
}

/// Write bytes to a file, creating or truncating it. An empty path is
/// refused.
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        bail!("refusing to write to an empty path");
    }
    fs::write(path, bytes).with_context(|| format!("failed to write file {:?}", path))
}

pub fn write_string<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    write_bytes(path, text.as_bytes())
}

/// Read a file and decode it from `encoding`.
pub fn read_to_string<P: AsRef<Path>>(path: P, encoding: &'static Encoding) -> Result<String> {
    let bytes = read_bytes(&path)?;
    let text = encoding::decode(&bytes, encoding)
        .with_context(|| format!("failed to decode {:?} as {}", path.as_ref(), encoding.name()))?;
    Ok(text)
}

/// Re-encode a file's contents from `src` to `dst`, returning the new
/// bytes.
#[instrument(level = "debug", skip(path, src, dst), fields(path = %path.as_ref().display(), src = src.name(), dst = dst.name()))]
pub fn transcode<P: AsRef<Path>>(
    path: P,
    src: &'static Encoding,
    dst: &'static Encoding,
) -> Result<Vec<u8>> {
    let text = read_to_string(&path, src)?;
    let bytes = encoding::encode(&text, dst)
        .with_context(|| format!("failed to encode {:?} into {}", path.as_ref(), dst.name()))?;
    Ok(bytes)
}

/// Load a CSV file: read the bytes, decode them, parse the text.
#[instrument(level = "info", skip(path, encoding, format), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(
    path: P,
    encoding: &'static Encoding,
    format: &CsvFormat,
) -> Result<Table> {
    let text = read_to_string(&path, encoding)?;
    let table = csv::parse(&text, format)
        .with_context(|| format!("failed to parse CSV from {:?}", path.as_ref()))?;
    Ok(table)
}

/// Write a table as CSV: serialize, encode, write the bytes.
#[instrument(level = "info", skip(path, table, encoding, format), fields(path = %path.as_ref().display(), rows = table.rows.len()))]
pub fn save_table<P: AsRef<Path>>(
    path: P,
    table: &Table,
    encoding: &'static Encoding,
    format: &CsvFormat,
) -> Result<()> {
    let text = csv::write(table, format);
    let bytes = encoding::encode(&text, encoding)
        .with_context(|| format!("failed to encode CSV for {:?}", path.as_ref()))?;
    write_bytes(path, &bytes)
}
