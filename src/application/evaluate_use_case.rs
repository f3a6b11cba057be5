// ============================================================
// Layer 2 - EvaluateUseCase
// ============================================================
// Scores a predicted token/label TSV against a gold-annotated
// one:
//
//   Step 1: Read both TSVs            (Layer 4 - data)
//   Step 2: Check token alignment     (here)
//   Step 3: Compute the report        (Layer 5 - labelling)
//   Step 4: Write the report CSV      (Layer 6 - infra)
//
// The two files must contain the same token sequences: metrics
// over misaligned files would silently compare unrelated tokens,
// so any mismatch is an error, reported with the first offending
// sequence.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::tsv::read_sequences;
use crate::infra::metrics::ReportWriter;
use crate::labelling::eval::{classification_report, Report};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    /// Gold-annotated token/label TSV
    pub gold: PathBuf,

    /// Predicted token/label TSV
    pub predicted: PathBuf,

    /// Where to write the report CSV
    pub report: PathBuf,

    /// Which label column to score (0 is the first label column)
    pub label_column: usize,
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Report> {
        let cfg = &self.config;

        // -- Step 1: read ------------------------------------------------------
        let gold = read_sequences(&cfg.gold, cfg.label_column)?;
        let pred = read_sequences(&cfg.predicted, cfg.label_column)?;

        // -- Step 2: alignment -------------------------------------------------
        if gold.len() != pred.len() {
            bail!(
                "'{}' has {} sequences but '{}' has {}",
                cfg.gold.display(),
                gold.len(),
                cfg.predicted.display(),
                pred.len()
            );
        }
        for (i, (g, p)) in gold.iter().zip(&pred).enumerate() {
            let g_tokens: Vec<&String> = g.iter().map(|(t, _)| t).collect();
            let p_tokens: Vec<&String> = p.iter().map(|(t, _)| t).collect();
            if g_tokens != p_tokens {
                bail!("Token mismatch in sequence {}", i);
            }
        }

        // -- Step 3: score -----------------------------------------------------
        let tags = |seqs: &[Vec<(String, String)>]| -> Vec<Vec<String>> {
            seqs.iter()
                .map(|s| s.iter().map(|(_, l)| l.clone()).collect())
                .collect()
        };
        let report = classification_report(&tags(&gold), &tags(&pred))?;

        tracing::info!(
            "Scored {} tokens across {} sequences, accuracy {:.4}",
            report.tokens,
            gold.len(),
            report.accuracy
        );

        // -- Step 4: write -----------------------------------------------------
        ReportWriter::write(&report, &cfg.report)?;

        Ok(report)
    }
}
