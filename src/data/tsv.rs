// ============================================================
// Layer 4 - Token/Label TSV I/O
// ============================================================
// The on-disk training format is tab-separated values with one
// token per row and one label column per annotation task:
//
//       References  o      o
//       1           o      o
//       .           o      o
//       WHO         title  b-r
//       treatment   title  i-r
//
// A row whose fields are all empty marks a sequence boundary
// (the end of a line-limited window or of a document). That is
// how downstream consumers recover example boundaries from a
// flat token stream.

use anyhow::{Context, Result};
use std::path::Path;

/// A row is `1 + n_label_columns` fields. A boundary row has the
/// same width with every field empty.
pub type Row = Vec<String>;

/// Build a boundary row of the given width
pub fn boundary_row(width: usize) -> Row {
    vec![String::new(); width]
}

/// True when every field of the row is empty
pub fn is_boundary(row: &[String]) -> bool {
    row.iter().all(|f| f.is_empty())
}

/// Write token/label rows as tab-separated values.
pub fn write_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    for row in rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    tracing::debug!("Wrote {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

/// Read token/label rows from a tab-separated file.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(rows)
}

/// Read a TSV and group it into sequences of (token, label) pairs,
/// split at boundary rows. The label is taken from `label_column`
/// (0 is the first label column, i.e. field index 1).
pub fn read_sequences(path: &Path, label_column: usize) -> Result<Vec<Vec<(String, String)>>> {
    let rows = read_rows(path)?;

    let mut sequences = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();

    for row in rows {
        if is_boundary(&row) {
            if !current.is_empty() {
                sequences.push(std::mem::take(&mut current));
            }
            continue;
        }

        let token = row.first().cloned().unwrap_or_default();
        let label = row
            .get(1 + label_column)
            .cloned()
            .with_context(|| {
                format!(
                    "Row for token '{}' has no label column {}",
                    token, label_column
                )
            })?;
        current.push((token, label));
    }

    if !current.is_empty() {
        sequences.push(current);
    }

    Ok(sequences)
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_boundary() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let rows = vec![
            vec!["WHO".to_string(), "b-r".to_string()],
            vec!["2016".to_string(), "i-r".to_string()],
            boundary_row(2),
            vec!["Intro".to_string(), "o".to_string()],
        ];
        write_rows(&path, &rows).unwrap();

        let back = read_rows(&path).unwrap();
        assert_eq!(back, rows);
        assert!(is_boundary(&back[2]));
    }

    #[test]
    fn test_sequences_split_at_boundaries() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let rows = vec![
            vec!["a".to_string(), "o".to_string()],
            boundary_row(2),
            vec!["b".to_string(), "b-r".to_string()],
            vec!["c".to_string(), "i-r".to_string()],
            boundary_row(2),
        ];
        write_rows(&path, &rows).unwrap();

        let seqs = read_sequences(&path, 0).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[1].len(), 2);
        assert_eq!(seqs[1][0], ("b".to_string(), "b-r".to_string()));
    }

    #[test]
    fn test_second_label_column() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let rows = vec![vec![
            "WHO".to_string(),
            "title".to_string(),
            "b-r".to_string(),
        ]];
        write_rows(&path, &rows).unwrap();

        let seqs = read_sequences(&path, 1).unwrap();
        assert_eq!(seqs[0][0].1, "b-r");
    }

    #[test]
    fn test_missing_label_column_errors() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        write_rows(&path, &[vec!["lonely".to_string()]]).unwrap();

        assert!(read_sequences(&path, 0).is_err());
    }
}
