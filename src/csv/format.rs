use serde::{Deserialize, Serialize};

/// Record terminator handling.
///
/// `Auto` reads and writes differently: on read it inspects the document
/// (the first `\r\n` anywhere selects CRLF for the whole document, otherwise
/// LF), on write it emits the platform terminator. Detection is document-global,
/// so a document mixing terminators follows the first `\r\n` found; pass an
/// explicit variant to pin the behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineTerminator {
    Crlf,
    Lf,
    Auto,
}

impl LineTerminator {
    /// The terminator emitted by the writer for this setting.
    pub fn write_str(&self) -> &'static str {
        match self {
            LineTerminator::Crlf => "\r\n",
            LineTerminator::Lf => "\n",
            LineTerminator::Auto => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// What to do with a record whose field count does not match the columns.
///
/// `Abort` fails the whole parse; `Skip` drops the record with a warning.
/// Skipping never happens silently, and an unterminated quote is fatal under
/// either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchPolicy {
    Abort,
    Skip,
}

/// Parse and write parameters for the codec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsvFormat {
    /// Field separator.
    pub delimiter: char,
    /// Quote character, both for reading and for wrapping written fields.
    pub quote: char,
    /// Whether the first record is a header naming the columns.
    pub has_header: bool,
    pub line_terminator: LineTerminator,
    /// Trim surrounding whitespace from unquoted fields. Quoted fields keep
    /// their whitespace regardless.
    pub trim_fields: bool,
    pub on_mismatch: MismatchPolicy,
}

impl Default for CsvFormat {
    fn default() -> Self {
        CsvFormat {
            delimiter: ',',
            quote: '"',
            has_header: true,
            line_terminator: LineTerminator::Auto,
            trim_fields: false,
            on_mismatch: MismatchPolicy::Abort,
        }
    }
}

impl CsvFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_line_terminator(mut self, line_terminator: LineTerminator) -> Self {
        self.line_terminator = line_terminator;
        self
    }

    pub fn with_trim(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    pub fn with_mismatch_policy(mut self, on_mismatch: MismatchPolicy) -> Self {
        self.on_mismatch = on_mismatch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_csv() {
        let format = CsvFormat::default();
        assert_eq!(format.delimiter, ',');
        assert_eq!(format.quote, '"');
        assert!(format.has_header);
        assert_eq!(format.line_terminator, LineTerminator::Auto);
        assert!(!format.trim_fields);
        assert_eq!(format.on_mismatch, MismatchPolicy::Abort);
    }

    #[test]
    fn builders_chain() {
        let format = CsvFormat::new()
            .with_delimiter(';')
            .with_header(false)
            .with_line_terminator(LineTerminator::Lf)
            .with_trim(true)
            .with_mismatch_policy(MismatchPolicy::Skip);
        assert_eq!(format.delimiter, ';');
        assert!(!format.has_header);
        assert_eq!(format.line_terminator, LineTerminator::Lf);
        assert!(format.trim_fields);
        assert_eq!(format.on_mismatch, MismatchPolicy::Skip);
    }

    #[test]
    fn explicit_terminators_write_their_sequence() {
        assert_eq!(LineTerminator::Crlf.write_str(), "\r\n");
        assert_eq!(LineTerminator::Lf.write_str(), "\n");
    }
}
