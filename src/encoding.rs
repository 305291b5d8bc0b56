use encoding_rs::Encoding;
use tracing::trace;

use crate::error::TabioError;

/// Resolve an encoding by WHATWG label, e.g. `"utf-8"` or `"windows-1252"`.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
}

/// Decode bytes declared to be in `encoding`, honoring a leading BOM.
///
/// Malformed input is an error rather than a replacement character; use
/// [`decode_lossy`] to opt into substitution.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, TabioError> {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(TabioError::Decode {
            encoding: actual.name(),
        });
    }
    trace!(encoding = actual.name(), len = bytes.len(), "decoded");
    Ok(text.into_owned())
}

/// Decode with U+FFFD substituted for malformed sequences.
pub fn decode_lossy(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Encode text into `encoding`.
///
/// Characters the encoding cannot represent are an error; use
/// [`encode_lossy`] to substitute numeric character references instead.
pub fn encode(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>, TabioError> {
    let (bytes, actual, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(TabioError::Encode {
            encoding: actual.name(),
        });
    }
    trace!(encoding = actual.name(), len = bytes.len(), "encoded");
    Ok(bytes.into_owned())
}

/// Encode with unmappable characters replaced by numeric character
/// references.
pub fn encode_lossy(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}
