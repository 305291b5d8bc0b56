// src/csv/mod.rs

pub mod fields;
pub mod format;
pub mod table;
pub mod tokenize;
pub mod write;

pub use fields::parse_fields;
pub use format::{CsvFormat, LineTerminator, MismatchPolicy};
pub use table::Table;
pub use tokenize::{detect_line_terminator, tokenize};
pub use write::write;

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::error::TabioError;

/// Parse CSV text into a [`Table`].
///
/// With a header, the first record names the columns; without one, columns
/// are named `Column1..ColumnN` from the first record's width and every
/// record becomes a row. Empty input is not an error: it produces an empty
/// table and a warning event.
#[instrument(level = "debug", skip(text, format), fields(len = text.len()))]
pub fn parse(text: &str, format: &CsvFormat) -> Result<Table, TabioError> {
    let mut records = tokenize(text, format);

    let first = match records.next() {
        Some(record) => record,
        None => {
            warn!("source is empty, producing an empty table");
            return Ok(Table::new());
        }
    };

    let first_fields = fields::parse_fields_at(first, format, 1)?;
    let mut table = if format.has_header {
        Table::with_columns(first_fields)
    } else {
        let mut table = Table::with_columns(synthetic_columns(first_fields.len()));
        table.rows.push(first_fields);
        table
    };

    let mut ordinal = 1;
    for record in records {
        ordinal += 1;
        let row = fields::parse_fields_at(record, format, ordinal)?;
        if keep_row(table.columns.len(), &row, ordinal, record, format)? {
            table.rows.push(row);
        }
    }

    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "parsed table"
    );
    Ok(table)
}

/// Same result as [`parse`], with per-record field parsing fanned out over
/// the rayon pool. Record boundaries are still found by one sequential scan,
/// and row order follows the source.
#[instrument(level = "debug", skip(text, format), fields(len = text.len()))]
pub fn parse_parallel(text: &str, format: &CsvFormat) -> Result<Table, TabioError> {
    let records: Vec<&str> = tokenize(text, format).collect();
    if records.is_empty() {
        warn!("source is empty, producing an empty table");
        return Ok(Table::new());
    }

    let parsed: Vec<Vec<String>> = records
        .par_iter()
        .enumerate()
        .map(|(idx, record)| fields::parse_fields_at(record, format, idx + 1))
        .collect::<Result<_, _>>()?;

    let mut table = Table::new();
    for (idx, row) in parsed.into_iter().enumerate() {
        if idx == 0 {
            if format.has_header {
                table.columns = row;
            } else {
                table.columns = synthetic_columns(row.len());
                table.rows.push(row);
            }
            continue;
        }
        let ordinal = idx + 1;
        if keep_row(table.columns.len(), &row, ordinal, records[idx], format)? {
            table.rows.push(row);
        }
    }

    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "parsed table in parallel"
    );
    Ok(table)
}

fn synthetic_columns(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Column{}", i)).collect()
}

/// Apply the mismatch policy to one parsed row: `Ok(true)` keeps it,
/// `Ok(false)` drops it with a warning, `Err` aborts the parse.
fn keep_row(
    columns: usize,
    row: &[String],
    ordinal: usize,
    raw: &str,
    format: &CsvFormat,
) -> Result<bool, TabioError> {
    if row.len() == columns {
        return Ok(true);
    }
    match format.on_mismatch {
        MismatchPolicy::Abort => Err(TabioError::FieldCountMismatch {
            record: ordinal,
            expected: columns,
            found: row.len(),
            raw: raw.to_string(),
        }),
        MismatchPolicy::Skip => {
            warn!(
                record = ordinal,
                expected = columns,
                found = row.len(),
                "skipping record with mismatched field count"
            );
            Ok(false)
        }
    }
}
