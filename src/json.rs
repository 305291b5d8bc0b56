// src/json.rs

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};
use tracing::{info, instrument, trace};

/// Read a line-delimited JSON file: one document per line.
///
/// Blank lines are skipped; a line that fails to parse is an error carrying
/// its 1-based line number. `limit` caps how many lines are read.
#[instrument(level = "debug", skip(path, limit), fields(path = %path.as_ref().display()))]
pub fn read_lines<T, P>(path: P, limit: Option<usize>) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let reader = BufReader::new(file);

    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(limit) = limit {
            if idx >= limit {
                trace!(limit, "stopping at line limit");
                break;
            }
        }
        let line =
            line.with_context(|| format!("failed to read line {} of {:?}", idx + 1, path))?;
        if line.trim().is_empty() {
            continue;
        }
        let item: T = serde_json::from_str(&line)
            .with_context(|| format!("invalid JSON on line {} of {:?}", idx + 1, path))?;
        items.push(item);
    }

    info!(items = items.len(), "read JSON lines");
    Ok(items)
}

/// Write items as line-delimited JSON: one compact document per line, with
/// a trailing newline, UTF-8.
#[instrument(level = "debug", skip(items, path), fields(path = %path.as_ref().display(), items = items.len()))]
pub fn write_lines<T, P>(items: &[T], path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for item in items {
        serde_json::to_writer(&mut writer, item)
            .with_context(|| format!("failed to serialize a record for {:?}", path))?;
        writer
            .write_all(b"\n")
            .with_context(|| format!("failed to write to {:?}", path))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {:?}", path))?;

    info!(items = items.len(), "wrote JSON lines");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,tabio::json=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Event {
        id: u32,
        tag: String,
    }

    fn events() -> Vec<Event> {
        vec![
            Event {
                id: 1,
                tag: "start".to_string(),
            },
            Event {
                id: 2,
                tag: "stop".to_string(),
            },
        ]
    }

    #[test]
    fn lines_round_trip() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("events.jsonl");
        write_lines(&events(), &path)?;

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));

        let back: Vec<Event> = read_lines(&path, None)?;
        assert_eq!(back, events());
        Ok(())
    }

    #[test]
    fn blank_lines_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("gappy.jsonl");
        std::fs::write(
            &path,
            "{\"id\":1,\"tag\":\"a\"}\n\n   \n{\"id\":2,\"tag\":\"b\"}\n",
        )?;
        let back: Vec<Event> = read_lines(&path, None)?;
        assert_eq!(back.len(), 2);
        Ok(())
    }

    #[test]
    fn limit_caps_the_lines_read() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.jsonl");
        write_lines(&events(), &path)?;
        let back: Vec<Event> = read_lines(&path, Some(1))?;
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].id, 1);
        Ok(())
    }

    #[test]
    fn bad_line_reports_its_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jsonl");
        std::fs::write(&path, "{\"id\":1,\"tag\":\"a\"}\nnot json\n").unwrap();
        let err = read_lines::<Event, _>(&path, None).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
