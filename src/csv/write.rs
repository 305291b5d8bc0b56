use super::format::CsvFormat;
use super::table::Table;

/// Serialize a table to CSV text.
///
/// Every field is wrapped in quotes with embedded quote characters doubled,
/// so any cell value round-trips, including delimiters and newlines. The
/// header record comes first when the format has one, and no terminator
/// follows the final record.
pub fn write(table: &Table, format: &CsvFormat) -> String {
    let terminator = format.line_terminator.write_str();

    let mut total = 0;
    if format.has_header {
        total += record_len(&table.columns, terminator.len());
    }
    for row in &table.rows {
        total += record_len(row, terminator.len());
    }

    let mut out = String::with_capacity(total);
    let mut first = true;
    if format.has_header {
        write_record(&mut out, &table.columns, format);
        first = false;
    }
    for row in &table.rows {
        if !first {
            out.push_str(terminator);
        }
        write_record(&mut out, row, format);
        first = false;
    }
    out
}

// cells + wrapping quotes + delimiters + terminator
fn record_len(cells: &[String], terminator_len: usize) -> usize {
    cells.iter().map(|c| c.len() + 3).sum::<usize>() + terminator_len
}

fn write_record(out: &mut String, cells: &[String], format: &CsvFormat) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(format.delimiter);
        }
        out.push(format.quote);
        for c in cell.chars() {
            if c == format.quote {
                out.push(format.quote);
            }
            out.push(c);
        }
        out.push(format.quote);
    }
}
