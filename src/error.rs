use thiserror::Error;

/// Errors produced by the codec and the encoding gateway.
///
/// Structural variants carry the 1-based ordinal of the offending record and
/// its raw text, so a caller can report exactly where a malformed source went
/// wrong. Empty input is not represented here: it parses to an empty table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabioError {
    /// The byte sequence is not valid for the declared encoding.
    #[error("invalid byte sequence for encoding {encoding}")]
    Decode { encoding: &'static str },

    /// The text contains characters the target encoding cannot represent.
    #[error("text not representable in encoding {encoding}")]
    Encode { encoding: &'static str },

    /// A quoted field was still open when its record ended.
    #[error("unterminated quoted field in record {record}: {raw:?}")]
    UnterminatedQuote { record: usize, raw: String },

    /// A record's field count does not match the table's column count.
    #[error("record {record} has {found} fields, expected {expected}: {raw:?}")]
    FieldCountMismatch {
        record: usize,
        expected: usize,
        found: usize,
        raw: String,
    },

    /// A row pushed onto a table does not match its column count.
    #[error("row has {found} cells, expected {expected}")]
    RowLength { expected: usize, found: usize },
}
