use anyhow::{bail, Context, Result};
use duckdb::types::Value;
use duckdb::{appender_params_from_iter, Connection};
use tracing::{debug, info, instrument};

use crate::csv::Table;

/// Open a database file at `path`, creating it if it does not exist.
pub fn open_db(path: &str) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("failed to open database at {}", path))?;
    Ok(conn)
}

/// Open an in-memory database.
pub fn open_mem_db() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    Ok(conn)
}

/// Run one query and materialize the whole result as a [`Table`] of text
/// cells. `NULL` renders as an empty cell.
#[instrument(level = "debug", skip(conn, sql))]
pub fn query_table(conn: &Connection, sql: &str) -> Result<Table> {
    let mut stmt = conn.prepare(sql).context("failed to prepare query")?;
    let mut rows = stmt.query([]).context("failed to execute query")?;

    let columns: Vec<String> = rows
        .as_ref()
        .map(|s| s.column_names().iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let mut table = Table::with_columns(columns);
    while let Some(row) = rows.next().context("failed to fetch row")? {
        let mut cells = Vec::with_capacity(table.columns.len());
        for idx in 0..table.columns.len() {
            let value: Value = row
                .get(idx)
                .with_context(|| format!("failed to read result column {}", idx))?;
            cells.push(render_value(value));
        }
        table.rows.push(cells);
    }

    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "query materialized"
    );
    Ok(table)
}

fn render_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(v) => v.to_string(),
        Value::TinyInt(v) => v.to_string(),
        Value::SmallInt(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::BigInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Text(v) => v,
        Value::Blob(v) => String::from_utf8_lossy(&v).into_owned(),
        other => format!("{:?}", other),
    }
}

/// Execute statements in batches of `batch_size`, joined with `;`. Returns
/// how many statements ran.
#[instrument(level = "debug", skip(conn, statements), fields(total = statements.len()))]
pub fn execute_batched(
    conn: &Connection,
    statements: &[String],
    batch_size: usize,
) -> Result<usize> {
    if batch_size == 0 {
        bail!("batch_size must be at least 1");
    }
    let mut executed = 0;
    for batch in statements.chunks(batch_size) {
        let sql = batch.join(";\n");
        conn.execute_batch(&sql)
            .with_context(|| format!("failed to execute a batch of {} statements", batch.len()))?;
        executed += batch.len();
        debug!(executed, "batch committed");
    }
    Ok(executed)
}

/// Create a table of VARCHAR columns named `name`, if it does not already
/// exist.
pub fn create_text_table(conn: &Connection, name: &str, columns: &[String]) -> Result<()> {
    let cols = columns
        .iter()
        .map(|c| format!("{} VARCHAR", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("CREATE TABLE IF NOT EXISTS {} ({});", quote_ident(name), cols);
    conn.execute_batch(&sql)
        .with_context(|| format!("failed to create table {}", name))?;
    Ok(())
}

/// Bulk-load a [`Table`]'s rows into the database table `name` through the
/// appender.
#[instrument(level = "info", skip(conn, table), fields(rows = table.rows.len()))]
pub fn insert_table(conn: &Connection, name: &str, table: &Table) -> Result<()> {
    let mut appender = conn
        .appender(name)
        .with_context(|| format!("failed to open appender for {}", name))?;
    for row in &table.rows {
        appender
            .append_row(appender_params_from_iter(row.iter().map(|cell| cell.as_str())))
            .context("failed to append row")?;
    }
    appender.flush().context("failed to flush appender")?;

    info!("rows inserted");
    Ok(())
}

// double-quote an identifier, doubling any embedded quotes
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
