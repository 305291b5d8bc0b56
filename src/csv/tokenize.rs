// src/csv/tokenize.rs

use super::format::{CsvFormat, LineTerminator};

/// Pick the terminator for a whole document: the first `\r\n` anywhere
/// selects CRLF, otherwise LF.
pub fn detect_line_terminator(text: &str) -> LineTerminator {
    if text.contains("\r\n") {
        LineTerminator::Crlf
    } else {
        LineTerminator::Lf
    }
}

/// Split `text` into raw records with a single forward scan that tracks
/// quote state. Terminators inside an open quote are content; a doubled
/// quote never toggles the state. The returned slices borrow from `text`
/// and exclude their terminators.
pub fn tokenize<'a>(text: &'a str, format: &CsvFormat) -> Records<'a> {
    let crlf = match format.line_terminator {
        LineTerminator::Crlf => true,
        LineTerminator::Lf => false,
        LineTerminator::Auto => detect_line_terminator(text) == LineTerminator::Crlf,
    };
    Records {
        text,
        pos: 0,
        quote: format.quote,
        crlf,
    }
}

/// Lazy iterator over the raw records of a document.
///
/// A trailing terminator closes the final record without producing a phantom
/// empty one; two adjacent terminators yield a genuinely empty record
/// between them. If a quote is still open at end of input, everything up to
/// the end becomes the final record and the field parser reports the error.
pub struct Records<'a> {
    text: &'a str,
    pos: usize,
    quote: char,
    crlf: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let mut in_quotes = false;
        let mut chars = rest.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c == self.quote {
                if in_quotes && chars.peek().map(|&(_, n)| n) == Some(self.quote) {
                    // escaped quote, stays inside the quoted region
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if !in_quotes {
                if self.crlf {
                    if c == '\r' && chars.peek().map(|&(_, n)| n) == Some('\n') {
                        self.pos += i + 2;
                        return Some(&rest[..i]);
                    }
                } else if c == '\n' {
                    self.pos += i + 1;
                    return Some(&rest[..i]);
                }
            }
        }

        // end of input closes the final record
        self.pos = self.text.len();
        Some(rest)
    }
}
