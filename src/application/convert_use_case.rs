// ============================================================
// Layer 2 - ConvertUseCase
// ============================================================
// Converts token-annotated JSONL datasets into the token/label
// TSV training format:
//
//   Step 1: Read every dataset        (Layer 4 - data)
//   Step 2: Check compatibility       (Layer 4 - data)
//   Step 3: Sort docs by input hash   (Layer 4 - data)
//   Step 4: Flatten to pairs          (Layer 4 - data)
//   Step 5: Merge label columns       (Layer 4 - data)
//   Step 6: Optional train/test split (Layer 4 - data)
//   Step 7: Write TSV file(s)         (Layer 4 - data)
//
// Passing several datasets merges their labels column by column,
// which is how the multi-task training file (token, parse label,
// split label) is produced from two annotation runs over the
// same documents.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    jsonl::read_jsonl,
    pair_builder::PairBuilder,
    splitter::split_train_test,
    tsv,
    validate::{check_compatible, merge_columns, sort_by_hash},
};
use crate::domain::document::AnnotatedDoc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Annotated JSONL datasets, one label column each
    pub inputs: Vec<PathBuf>,

    /// Output TSV path. With a test split, `_train` / `_test`
    /// suffixed files are written instead.
    pub output: PathBuf,

    /// Maximum tokens per example window
    pub line_limit: usize,

    /// End examples at newline tokens in the text
    pub respect_line_endings: bool,

    /// End examples at document boundaries
    pub respect_doc_endings: bool,

    /// Fraction of examples held out for testing (0 disables)
    pub test_fraction: f64,

    /// Shuffle seed for a reproducible split, if any
    pub seed: Option<u64>,
}

/// What the run produced, for the CLI layer to report
pub struct ConvertSummary {
    pub documents: usize,
    pub examples:  usize,
    pub written:   Vec<PathBuf>,
}

pub struct ConvertUseCase {
    config: ConvertConfig,
}

impl ConvertUseCase {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ConvertSummary> {
        let cfg = &self.config;

        if cfg.inputs.is_empty() {
            anyhow::bail!("No input datasets given");
        }
        if !(0.0..1.0).contains(&cfg.test_fraction) {
            anyhow::bail!("test fraction must be in [0, 1), got {}", cfg.test_fraction);
        }

        // -- Step 1: read datasets ---------------------------------------------
        tracing::info!("Loading annotations from {} dataset(s)", cfg.inputs.len());
        tracing::info!("Respect line endings: {}", cfg.respect_line_endings);
        tracing::info!("Respect doc endings: {}", cfg.respect_doc_endings);
        tracing::info!("Line limit: {}", cfg.line_limit);

        let mut datasets: Vec<Vec<AnnotatedDoc>> = Vec::with_capacity(cfg.inputs.len());
        for path in &cfg.inputs {
            let docs: Vec<AnnotatedDoc> = read_jsonl(path)
                .with_context(|| format!("Failed reading dataset '{}'", path.display()))?;
            tracing::info!("'{}': {} documents", path.display(), docs.len());
            datasets.push(docs);
        }
        let documents = datasets[0].len();

        // -- Step 2: compatibility ---------------------------------------------
        check_compatible(&datasets)?;

        // -- Step 3 + 4: sort and flatten --------------------------------------
        let streams: Vec<_> = datasets
            .into_iter()
            .map(|docs| {
                let docs = sort_by_hash(docs);
                let mut builder = PairBuilder::new(
                    cfg.line_limit,
                    cfg.respect_line_endings,
                    cfg.respect_doc_endings,
                );
                builder.run(&docs)
            })
            .collect();

        // -- Step 5: merge into rows -------------------------------------------
        let rows = merge_columns(&streams)?;

        for row in rows.iter().take(15) {
            tracing::debug!("row: {:?}", row);
        }

        let examples = group_examples(rows);
        let example_count = examples.len();

        // -- Step 6 + 7: split and write ---------------------------------------
        let written = if cfg.test_fraction > 0.0 {
            let (train, test) = split_train_test(examples, 1.0 - cfg.test_fraction, cfg.seed);
            let train_path = suffixed(&cfg.output, "_train");
            let test_path  = suffixed(&cfg.output, "_test");
            tsv::write_rows(&train_path, &flatten(train))?;
            tsv::write_rows(&test_path, &flatten(test))?;
            vec![train_path, test_path]
        } else {
            tsv::write_rows(&cfg.output, &flatten(examples))?;
            vec![cfg.output.clone()]
        };

        tracing::info!(
            "Converted {} documents into {} examples",
            documents,
            example_count
        );

        Ok(ConvertSummary {
            documents,
            examples: example_count,
            written,
        })
    }
}

/// Group a flat row stream into examples, splitting after each
/// boundary row. The boundary stays with its example so writing
/// the groups back reproduces the stream.
fn group_examples(rows: Vec<tsv::Row>) -> Vec<Vec<tsv::Row>> {
    let mut examples = Vec::new();
    let mut current  = Vec::new();

    for row in rows {
        let is_boundary = tsv::is_boundary(&row);
        current.push(row);
        if is_boundary {
            examples.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        examples.push(current);
    }

    examples
}

fn flatten(examples: Vec<Vec<tsv::Row>>) -> Vec<tsv::Row> {
    examples.into_iter().flatten().collect()
}

/// "out.tsv" + "_train" -> "out_train.tsv"
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let ext  = path.extension().and_then(|s| s.to_str()).unwrap_or("tsv");
    path.with_file_name(format!("{stem}{suffix}.{ext}"))
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Two documents, fully annotated with single-token spans
    const DATASET: &str = concat!(
        r#"{"text":"WHO 2016.","tokens":[{"text":"WHO","start":0,"end":3,"id":0},{"text":"2016","start":4,"end":8,"id":1}],"spans":[{"start":0,"end":3,"token_start":0,"token_end":0,"label":"b-r"},{"start":4,"end":8,"token_start":1,"token_end":1,"label":"i-r"}],"_input_hash":2}"#,
        "\n",
        r#"{"text":"Intro.","tokens":[{"text":"Intro","start":0,"end":5,"id":0}],"spans":[{"start":0,"end":5,"token_start":0,"token_end":0,"label":"o"}],"_input_hash":1}"#,
        "\n",
    );

    fn config(dir: &Path, inputs: Vec<PathBuf>) -> ConvertConfig {
        ConvertConfig {
            inputs,
            output:               dir.join("out.tsv"),
            line_limit:           250,
            respect_line_endings: false,
            respect_doc_endings:  true,
            test_fraction:        0.0,
            seed:                 None,
        }
    }

    #[test]
    fn test_single_dataset_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.jsonl");
        fs::write(&input, DATASET).unwrap();

        let summary = ConvertUseCase::new(config(dir.path(), vec![input]))
            .execute()
            .unwrap();

        assert_eq!(summary.documents, 2);
        assert_eq!(summary.examples, 2);

        // Docs are sorted by hash: "Intro" (hash 1) comes first
        let rows = tsv::read_rows(&summary.written[0]).unwrap();
        assert_eq!(rows[0], vec!["Intro", "o"]);
        assert!(tsv::is_boundary(&rows[1]));
        assert_eq!(rows[2], vec!["WHO", "b-r"]);
    }

    #[test]
    fn test_two_datasets_merge_labels() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        fs::write(&a, DATASET).unwrap();
        // Same docs and tokens, different labels
        fs::write(&b, DATASET.replace("b-r", "title").replace("i-r", "year")).unwrap();

        let summary = ConvertUseCase::new(config(dir.path(), vec![a, b]))
            .execute()
            .unwrap();

        let rows = tsv::read_rows(&summary.written[0]).unwrap();
        assert_eq!(rows[2], vec!["WHO", "b-r", "title"]);
        assert_eq!(rows[3], vec!["2016", "i-r", "year"]);
    }

    #[test]
    fn test_incompatible_datasets_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        fs::write(&a, DATASET).unwrap();
        fs::write(&b, DATASET.replace("\"WHO\"", "\"UNICEF\"")).unwrap();

        let result = ConvertUseCase::new(config(dir.path(), vec![a, b])).execute();
        assert!(result.is_err());
    }

    #[test]
    fn test_split_writes_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.jsonl");
        fs::write(&input, DATASET).unwrap();

        let mut cfg = config(dir.path(), vec![input]);
        cfg.test_fraction = 0.5;
        let summary = ConvertUseCase::new(cfg).execute().unwrap();

        assert_eq!(summary.written.len(), 2);
        assert!(summary.written[0].ends_with("out_train.tsv"));
        assert!(summary.written[1].ends_with("out_test.tsv"));

        // Between them, both examples survive the split
        let total: usize = summary
            .written
            .iter()
            .map(|p| tsv::read_sequences(p, 0).unwrap().len())
            .sum();
        assert_eq!(total, 2);
    }
}
