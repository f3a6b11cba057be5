// ============================================================
// Layer 2 - SplitUseCase
// ============================================================
// Runs the span-finding pipeline in order:
//
//   Step 1: Load documents            (Layer 4 - data)
//   Step 2: Clean the text            (Layer 4 - data)
//   Step 3: Tokenize line by line     (Layer 4 - data)
//   Step 4: Load model config         (Layer 6 - infra)
//   Step 5: Label every token         (Layer 5 - labelling)
//   Step 6: Decode spans              (Layer 5 - labelling)
//   Step 7: Write TSV / references    (Layer 4 - data)
//
// Each text line is one example. Lines longer than the model
// window (line_limit) are cut at the window boundary in the TSV
// output, matching how training data is converted.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    jsonl::write_jsonl,
    loader::TextLoader,
    preprocessor::Preprocessor,
    tokenize::tokenize_lines,
    tsv,
};
use crate::domain::label::Task;
use crate::domain::reference::Reference;
use crate::domain::traits::{DocumentSource, TokenLabeller};
use crate::infra::model_config::ModelConfig;
use crate::labelling::{decode::extract_references, heuristic::ReferenceSplitter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Text file or directory of .txt files to label
    pub input: String,

    /// Where to write token/tag TSV rows, if anywhere
    pub output_tsv: Option<PathBuf>,

    /// Where to write extracted references as JSONL, if anywhere
    pub output_refs: Option<PathBuf>,

    /// Model directory holding a model_config.json, if any
    pub model_dir: Option<PathBuf>,

    /// Cue score threshold for the splitter
    pub threshold: u32,
}

/// What the run produced, for the CLI layer to report
pub struct SplitSummary {
    pub documents:  usize,
    pub lines:      usize,
    pub references: Vec<Reference>,
}

pub struct SplitUseCase {
    config: SplitConfig,
}

impl SplitUseCase {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SplitSummary> {
        let cfg = &self.config;

        // -- Step 1: load documents -------------------------------------------
        tracing::info!("Loading documents from '{}'", cfg.input);
        let loader = TextLoader::new(&cfg.input);
        let docs   = loader.load_all()?;

        // -- Step 2 + 3: clean and tokenize ------------------------------------
        let preprocessor = Preprocessor::new();
        let doc_lines: Vec<(String, Vec<Vec<crate::domain::document::Token>>)> = docs
            .iter()
            .map(|d| {
                let clean = preprocessor.clean(&d.text);
                let lines = tokenize_lines(&clean);
                (clean, lines)
            })
            .collect();

        // -- Step 4: model config ----------------------------------------------
        let model_config =
            ModelConfig::load_or_default(cfg.model_dir.as_deref(), Task::Splitting)?;

        // -- Step 5: label -----------------------------------------------------
        let labeller = ReferenceSplitter::new(cfg.threshold);

        let mut rows: Vec<tsv::Row> = Vec::new();
        let mut references = Vec::new();
        let mut line_count = 0usize;

        for (clean_text, lines) in &doc_lines {
            let token_texts: Vec<Vec<String>> = lines
                .iter()
                .map(|ts| ts.iter().map(|t| t.text.clone()).collect())
                .collect();

            let tags = labeller.label(&token_texts)?;

            // -- Step 6: decode spans per line ---------------------------------
            for (line_no, (line_tokens, line_tags)) in lines.iter().zip(&tags).enumerate() {
                if line_tokens.is_empty() {
                    continue;
                }
                line_count += 1;

                let line_text = clean_text.lines().nth(line_no).unwrap_or_default();
                references.extend(extract_references(
                    line_text,
                    line_tokens,
                    line_tags,
                    line_no,
                ));

                // One example per line, windowed at line_limit
                for (i, (token, tag)) in line_tokens.iter().zip(line_tags).enumerate() {
                    if i > 0 && i % model_config.line_limit == 0 {
                        rows.push(tsv::boundary_row(2));
                    }
                    rows.push(vec![token.text.clone(), tag.clone()]);
                }
                rows.push(tsv::boundary_row(2));
            }
        }

        tracing::info!(
            "Labelled {} lines across {} documents, found {} references",
            line_count,
            docs.len(),
            references.len()
        );

        // -- Step 7: write outputs ---------------------------------------------
        if let Some(path) = &cfg.output_tsv {
            tsv::write_rows(path, &rows)?;
        }
        if let Some(path) = &cfg.output_refs {
            write_jsonl(path, &references)?;
        }

        Ok(SplitSummary {
            documents: docs.len(),
            lines: line_count,
            references,
        })
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOC: &str = "\
Health outcomes improved steadily across all districts this year.\n\
\n\
References\n\
Smith, J. and Jones, K. (2019). Health policy in practice. pp. 4-7.\n\
WHO treatment guidelines for drug-resistant tuberculosis, 2016. doi.org/x\n";

    #[test]
    fn test_end_to_end_split() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, DOC).unwrap();

        let out_tsv  = dir.path().join("out.tsv");
        let out_refs = dir.path().join("refs.jsonl");

        let summary = SplitUseCase::new(SplitConfig {
            input:       path.to_str().unwrap().to_string(),
            output_tsv:  Some(out_tsv.clone()),
            output_refs: Some(out_refs.clone()),
            model_dir:   None,
            threshold:   3,
        })
        .execute()
        .unwrap();

        assert_eq!(summary.documents, 1);
        assert_eq!(summary.references.len(), 2);
        assert!(summary.references[0].text.starts_with("Smith"));

        // TSV has one row per token plus boundaries, prose rows are o
        let seqs = tsv::read_sequences(&out_tsv, 0).unwrap();
        assert!(seqs[0].iter().all(|(_, tag)| tag == "o"));
        assert!(out_refs.exists());
    }

    #[test]
    fn test_prose_only_finds_nothing() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "Just an ordinary paragraph about programme delivery.\n").unwrap();

        let summary = SplitUseCase::new(SplitConfig {
            input:       path.to_str().unwrap().to_string(),
            output_tsv:  None,
            output_refs: None,
            model_dir:   None,
            threshold:   3,
        })
        .execute()
        .unwrap();

        assert!(summary.references.is_empty());
    }
}
