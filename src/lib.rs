//! Whole-file tabular I/O built around a hand-written CSV codec.
//!
//! The codec turns raw bytes in an arbitrary text encoding into an in-memory
//! [`Table`] and serializes tables back to CSV text with round-trip-safe
//! quoting. Around it sit thin collaborators: byte-level file I/O with
//! encoding conversion, depth-first directory traversal, line-delimited JSON
//! read/write, and a small SQL wrapper that materializes query results as
//! tables.
//!
//! ```
//! use tabio::{parse, write, CsvFormat};
//!
//! # fn main() -> Result<(), tabio::TabioError> {
//! let table = parse("id,name\n1,ada\n2,grace", &CsvFormat::new())?;
//! assert_eq!(table.cell(1, "name"), Some("grace"));
//!
//! let text = write(&table, &CsvFormat::new());
//! assert!(text.starts_with("\"id\",\"name\""));
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod encoding;
pub mod error;
pub mod fs;
pub mod json;
pub mod sql;

pub use csv::{parse, parse_parallel, write, CsvFormat, LineTerminator, MismatchPolicy, Table};
pub use error::TabioError;
