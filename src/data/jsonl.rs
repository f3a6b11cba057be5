// ============================================================
// Layer 4 - JSON Lines I/O
// ============================================================
// Annotated datasets and extracted references travel as JSONL:
// one JSON value per line, blank lines ignored. Reading is
// line-by-line so a malformed line reports its line number
// instead of a byte offset into a multi-megabyte file.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Read every record from a JSONL file.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut records = Vec::new();

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).with_context(|| {
            format!("Malformed JSON at {}:{}", path.display(), lineno + 1)
        })?;
        records.push(record);
    }

    tracing::debug!("Read {} records from '{}'", records.len(), path.display());
    Ok(records)
}

/// Write records to a JSONL file, one per line.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    tracing::debug!("Wrote {} records to '{}'", records.len(), path.display());
    Ok(())
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        n: usize,
    }

    #[test]
    fn test_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");

        let rows = vec![Row { n: 1 }, Row { n: 2 }];
        write_jsonl(&path, &rows).unwrap();
        let back: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{\"n\": 1}\n\n{\"n\": 2}\n").unwrap();

        let back: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_error_names_the_line() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{\"n\": 1}\nnot json\n").unwrap();

        let err = read_jsonl::<Row>(&path).unwrap_err();
        assert!(format!("{err:#}").contains(":2"));
    }
}
