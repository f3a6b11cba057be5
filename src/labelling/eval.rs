// ============================================================
// Layer 5 - Tagging Metrics
// ============================================================
// Token-level precision / recall / F1 per label, for scoring a
// predicted tag sequence against gold annotations.
//
// The outside tag is excluded from the per-label report (it
// dominates every corpus and says nothing about span quality)
// but still counts towards overall accuracy.
//
// Zero denominators report 0.0 rather than erroring: a label
// with no predictions simply has no precision to speak of.
//
// Reference: the seqeval classification report layout

use anyhow::{bail, Result};
use std::collections::BTreeMap;

use crate::domain::label::OUTSIDE;

/// Metrics for a single label
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label:     String,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    /// Number of gold tokens carrying this label
    pub support:   usize,
}

/// The full evaluation result
#[derive(Debug, Clone)]
pub struct Report {
    /// Per-label metrics, sorted by label name
    pub classes:  Vec<ClassMetrics>,
    /// Fraction of all tokens tagged exactly right
    pub accuracy: f64,
    /// Total number of scored tokens
    pub tokens:   usize,
}

/// Score predicted tags against gold tags. Both inputs are one
/// tag vector per sequence and must have identical shape.
pub fn classification_report(gold: &[Vec<String>], pred: &[Vec<String>]) -> Result<Report> {
    if gold.len() != pred.len() {
        bail!(
            "Sequence count mismatch: {} gold vs {} predicted",
            gold.len(),
            pred.len()
        );
    }

    #[derive(Default)]
    struct Counts {
        tp:      usize,
        fp:      usize,
        fn_:     usize,
        support: usize,
    }

    let mut by_label: BTreeMap<String, Counts> = BTreeMap::new();
    let mut correct = 0usize;
    let mut total   = 0usize;

    for (seq_no, (g_seq, p_seq)) in gold.iter().zip(pred).enumerate() {
        if g_seq.len() != p_seq.len() {
            bail!(
                "Sequence {} length mismatch: {} gold vs {} predicted tokens",
                seq_no,
                g_seq.len(),
                p_seq.len()
            );
        }

        for (g, p) in g_seq.iter().zip(p_seq) {
            total += 1;
            if g == p {
                correct += 1;
            }

            if g != OUTSIDE {
                let c = by_label.entry(g.clone()).or_default();
                c.support += 1;
                if g == p {
                    c.tp += 1;
                } else {
                    c.fn_ += 1;
                }
            }
            if p != OUTSIDE && p != g {
                by_label.entry(p.clone()).or_default().fp += 1;
            }
        }
    }

    let classes = by_label
        .into_iter()
        .map(|(label, c)| {
            let precision = ratio(c.tp, c.tp + c.fp);
            let recall    = ratio(c.tp, c.tp + c.fn_);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            ClassMetrics { label, precision, recall, f1, support: c.support }
        })
        .collect();

    Ok(Report {
        classes,
        accuracy: ratio(correct, total),
        tokens:   total,
    })
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
