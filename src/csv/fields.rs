use crate::error::TabioError;

use super::format::CsvFormat;

/// Per-field scanner state. `Closed` means a quoted field just ended and we
/// expect a delimiter or end of record next.
enum State {
    Start,
    Unquoted,
    Quoted,
    Closed,
}

/// Split one raw record into its field values.
///
/// Quoted and unquoted fields are asymmetric on purpose: a field beginning
/// with the quote character has its wrapper stripped and doubled quotes
/// collapsed, anything else is taken verbatim. The record is treated as an
/// input's first record for error reporting.
pub fn parse_fields(record: &str, format: &CsvFormat) -> Result<Vec<String>, TabioError> {
    parse_fields_at(record, format, 1)
}

/// Like [`parse_fields`], with the record's 1-based ordinal for diagnostics.
pub(crate) fn parse_fields_at(
    record: &str,
    format: &CsvFormat,
    ordinal: usize,
) -> Result<Vec<String>, TabioError> {
    let mut fields = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut state = State::Start;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Start => {
                if c == format.quote {
                    quoted = true;
                    state = State::Quoted;
                } else if c == format.delimiter {
                    finish_field(&mut fields, &mut cell, &mut quoted, format);
                } else {
                    cell.push(c);
                    state = State::Unquoted;
                }
            }
            State::Unquoted => {
                if c == format.delimiter {
                    finish_field(&mut fields, &mut cell, &mut quoted, format);
                    state = State::Start;
                } else {
                    cell.push(c);
                }
            }
            State::Quoted => {
                if c == format.quote {
                    if chars.peek() == Some(&format.quote) {
                        chars.next();
                        cell.push(format.quote);
                    } else {
                        state = State::Closed;
                    }
                } else {
                    cell.push(c);
                }
            }
            State::Closed => {
                if c == format.delimiter {
                    finish_field(&mut fields, &mut cell, &mut quoted, format);
                    state = State::Start;
                } else {
                    // stray text after a closing quote attaches verbatim
                    cell.push(c);
                }
            }
        }
    }

    if let State::Quoted = state {
        return Err(TabioError::UnterminatedQuote {
            record: ordinal,
            raw: record.to_string(),
        });
    }

    // the last field ends with the record; an empty record is one empty field
    finish_field(&mut fields, &mut cell, &mut quoted, format);
    Ok(fields)
}

fn finish_field(fields: &mut Vec<String>, cell: &mut String, quoted: &mut bool, format: &CsvFormat) {
    let value = std::mem::take(cell);
    if format.trim_fields && !*quoted {
        fields.push(value.trim().to_string());
    } else {
        fields.push(value);
    }
    *quoted = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> CsvFormat {
        CsvFormat::new()
    }

    #[test]
    fn plain_fields_split_on_delimiter() -> Result<(), TabioError> {
        assert_eq!(parse_fields("a,b,c", &fmt())?, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn quoted_field_strips_wrapper_and_collapses_doubled_quotes() -> Result<(), TabioError> {
        assert_eq!(
            parse_fields("\"He said \"\"hi\"\"\",x", &fmt())?,
            vec!["He said \"hi\"", "x"]
        );
        Ok(())
    }

    #[test]
    fn quoted_field_keeps_embedded_delimiter() -> Result<(), TabioError> {
        assert_eq!(parse_fields("\"a,b\",c", &fmt())?, vec!["a,b", "c"]);
        Ok(())
    }

    #[test]
    fn unquoted_field_is_verbatim() -> Result<(), TabioError> {
        // doubled quotes mid-field are content, not an escape
        assert_eq!(parse_fields("a\"\"b,c", &fmt())?, vec!["a\"\"b", "c"]);
        Ok(())
    }

    #[test]
    fn empty_fields_between_delimiters() -> Result<(), TabioError> {
        assert_eq!(parse_fields("a,,c", &fmt())?, vec!["a", "", "c"]);
        Ok(())
    }

    #[test]
    fn trailing_delimiter_adds_an_empty_field() -> Result<(), TabioError> {
        assert_eq!(parse_fields("a,b,", &fmt())?, vec!["a", "b", ""]);
        Ok(())
    }

    #[test]
    fn empty_record_is_one_empty_field() -> Result<(), TabioError> {
        assert_eq!(parse_fields("", &fmt())?, vec![""]);
        Ok(())
    }

    #[test]
    fn empty_quoted_field() -> Result<(), TabioError> {
        assert_eq!(parse_fields("a,\"\",c", &fmt())?, vec!["a", "", "c"]);
        Ok(())
    }

    #[test]
    fn whitespace_survives_without_trim() -> Result<(), TabioError> {
        assert_eq!(parse_fields(" a , b ", &fmt())?, vec![" a ", " b "]);
        Ok(())
    }

    #[test]
    fn trim_applies_to_unquoted_fields_only() -> Result<(), TabioError> {
        let format = fmt().with_trim(true);
        assert_eq!(
            parse_fields(" a ,\" b \"", &format)?,
            vec!["a", " b "]
        );
        Ok(())
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_fields("a,\"open", &fmt()).unwrap_err();
        assert_eq!(
            err,
            TabioError::UnterminatedQuote {
                record: 1,
                raw: "a,\"open".to_string(),
            }
        );
    }

    #[test]
    fn semicolon_delimiter() -> Result<(), TabioError> {
        let format = fmt().with_delimiter(';');
        assert_eq!(parse_fields("a;b,c;d", &format)?, vec!["a", "b,c", "d"]);
        Ok(())
    }
}
