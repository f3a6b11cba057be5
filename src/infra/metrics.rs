// ============================================================
// Layer 6 - Evaluation Report Writer
// ============================================================
// Writes an evaluation report to a CSV file: one row per label
// plus a trailing accuracy row.
//
// Example output:
//   label,precision,recall,f1,support
//   b-r,0.912000,0.874000,0.892595,412
//   i-r,0.948000,0.901000,0.923903,5120
//   accuracy,,,0.934000,5532
//
// CSV keeps the report easy to open in a spreadsheet and to
// track across runs.

use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path};

use crate::labelling::eval::Report;

pub struct ReportWriter;

impl ReportWriter {
    /// Write the full report to `path`, creating parent
    /// directories as needed.
    pub fn write(report: &Report, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut f = fs::File::create(path)
            .with_context(|| format!("Cannot create report '{}'", path.display()))?;

        writeln!(f, "label,precision,recall,f1,support")?;
        for class in &report.classes {
            writeln!(
                f,
                "{},{:.6},{:.6},{:.6},{}",
                class.label, class.precision, class.recall, class.f1, class.support,
            )?;
        }
        writeln!(f, "accuracy,,,{:.6},{}", report.accuracy, report.tokens)?;

        tracing::info!(
            "Wrote evaluation report ({} labels) to '{}'",
            report.classes.len(),
            path.display()
        );
        Ok(())
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelling::eval::ClassMetrics;

    #[test]
    fn test_report_layout() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let report = Report {
            classes: vec![ClassMetrics {
                label:     "b-r".to_string(),
                precision: 0.5,
                recall:    1.0,
                f1:        2.0 / 3.0,
                support:   2,
            }],
            accuracy: 0.75,
            tokens:   4,
        };
        ReportWriter::write(&report, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "label,precision,recall,f1,support");
        assert!(lines[1].starts_with("b-r,0.500000,1.000000,0.666667,2"));
        assert!(lines[2].starts_with("accuracy,,,0.750000,4"));
    }
}
