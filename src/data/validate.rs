// ============================================================
// Layer 4 - Dataset Validation and Merging
// ============================================================
// The splitting and parsing tasks are annotated independently
// over the same documents. Before their labels can be merged
// into one multi-column TSV, the datasets must be provably
// compatible:
//
//   1. Every dataset contains the same documents, matched by
//      the annotation tool's input hash.
//   2. For every shared document, the token texts are identical
//      across datasets.
//
// If either check fails, conversion aborts with the offending
// document hashes. Silently merging mismatched datasets would
// pair tokens with labels from a different document.

use anyhow::{bail, Result};
use std::collections::{HashMap, HashSet};

use crate::data::pair_builder::Pair;
use crate::data::tsv::Row;
use crate::domain::document::AnnotatedDoc;

/// Check that all datasets cover the same documents with the same
/// tokens. Single-dataset input is trivially compatible.
pub fn check_compatible(datasets: &[Vec<AnnotatedDoc>]) -> Result<()> {
    if datasets.len() < 2 {
        return Ok(());
    }

    let hash_sets: Vec<HashSet<i64>> = datasets
        .iter()
        .map(|docs| docs.iter().map(|d| d.input_hash).collect())
        .collect();

    // Same documents everywhere, reported pairwise so the error
    // names exactly which datasets disagree
    for i in 0..hash_sets.len() {
        for j in (i + 1)..hash_sets.len() {
            let diff: Vec<&i64> = hash_sets[i].symmetric_difference(&hash_sets[j]).collect();
            if !diff.is_empty() {
                bail!(
                    "Datasets {} and {} disagree on documents: {:?}",
                    i,
                    j,
                    diff
                );
            }
        }
    }

    // Same tokens for every shared document
    let by_hash: Vec<HashMap<i64, &AnnotatedDoc>> = datasets
        .iter()
        .map(|docs| docs.iter().map(|d| (d.input_hash, d)).collect())
        .collect();

    for hash in &hash_sets[0] {
        let mut token_lists = by_hash
            .iter()
            .filter_map(|m| m.get(hash))
            .map(|d| d.token_texts());

        let first = token_lists.next().unwrap_or_default();
        if token_lists.any(|tokens| tokens != first) {
            bail!("Token mismatch for document {}", hash);
        }
    }

    Ok(())
}

/// Sort documents by input hash so independently exported datasets
/// flatten in the same order.
pub fn sort_by_hash(mut docs: Vec<AnnotatedDoc>) -> Vec<AnnotatedDoc> {
    docs.sort_by_key(|d| d.input_hash);
    docs
}

/// Combine one pair stream per dataset into multi-column TSV rows:
/// (token, label_1, .., label_n). The token column comes from the
/// first stream; compatible datasets produce identical token and
/// boundary structure, which is verified as we go.
pub fn merge_columns(streams: &[Vec<Pair>]) -> Result<Vec<Row>> {
    let width = 1 + streams.len();
    let len = streams
        .first()
        .map(|s| s.len())
        .unwrap_or(0);

    if streams.iter().any(|s| s.len() != len) {
        bail!("Pair streams have different lengths; datasets are not aligned");
    }

    let mut rows = Vec::with_capacity(len);

    for i in 0..len {
        let first = &streams[0][i];

        if first.is_boundary() {
            if streams.iter().any(|s| !s[i].is_boundary()) {
                bail!("Boundary misalignment between datasets at row {}", i);
            }
            rows.push(vec![String::new(); width]);
            continue;
        }

        let mut row = Vec::with_capacity(width);
        row.push(first.token.clone().unwrap_or_default());
        for stream in streams {
            row.push(stream[i].label.clone().unwrap_or_default());
        }
        rows.push(row);
    }

    Ok(rows)
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Token;

    fn doc(hash: i64, texts: &[&str]) -> AnnotatedDoc {
        let tokens = texts
            .iter()
            .enumerate()
            .map(|(id, t)| Token { text: t.to_string(), start: 0, end: 0, id })
            .collect();
        AnnotatedDoc { text: String::new(), tokens, spans: None, input_hash: hash }
    }

    #[test]
    fn test_matching_datasets_pass() {
        let a = vec![doc(1, &["x"]), doc(2, &["y"])];
        let b = vec![doc(2, &["y"]), doc(1, &["x"])];
        assert!(check_compatible(&[a, b]).is_ok());
    }

    #[test]
    fn test_missing_doc_fails() {
        let a = vec![doc(1, &["x"]), doc(2, &["y"])];
        let b = vec![doc(1, &["x"])];
        assert!(check_compatible(&[a, b]).is_err());
    }

    #[test]
    fn test_token_mismatch_fails() {
        let a = vec![doc(1, &["x"])];
        let b = vec![doc(1, &["z"])];
        let err = check_compatible(&[a, b]).unwrap_err();
        assert!(err.to_string().contains("Token mismatch"));
    }

    #[test]
    fn test_merge_two_label_columns() {
        let t = |tok: &str, lab: &str| Pair {
            token: Some(tok.to_string()),
            label: Some(lab.to_string()),
        };
        let a = vec![t("WHO", "title"), Pair::boundary()];
        let b = vec![t("WHO", "b-r"), Pair::boundary()];

        let rows = merge_columns(&[a, b]).unwrap();
        assert_eq!(rows[0], vec!["WHO", "title", "b-r"]);
        assert_eq!(rows[1], vec!["", "", ""]);
    }

    #[test]
    fn test_misaligned_boundaries_fail() {
        let t = |tok: &str| Pair { token: Some(tok.to_string()), label: None };
        let a = vec![t("x"), Pair::boundary()];
        let b = vec![Pair::boundary(), t("x")];
        assert!(merge_columns(&[a, b]).is_err());
    }
}
