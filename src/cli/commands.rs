// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the five subcommands and their flags. clap's derive
// macros generate the help text, missing-argument errors, and
// string-to-number conversions.
//
// The From impls at the bottom are the boundary between Layer 1
// and Layer 2: the application layer never sees clap types.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::domain::label::Task;

use crate::application::convert_use_case::ConvertConfig;
use crate::application::evaluate_use_case::EvaluateConfig;
use crate::application::parse_use_case::ParseConfig;
use crate::application::split_use_case::SplitConfig;

/// The subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find reference spans in documents
    Split(SplitArgs),

    /// Label the author / title / year components of references
    Parse(ParseArgs),

    /// Convert annotated JSONL datasets to token/label TSV
    Convert(ConvertArgs),

    /// Score a predicted TSV against a gold-annotated TSV
    Evaluate(EvaluateArgs),

    /// Download missing model artefacts
    Fetch(FetchArgs),
}

/// Arguments for the `split` command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Text file or directory of .txt files to label
    pub input: String,

    /// Write token/tag rows to this TSV file
    #[arg(long)]
    pub output_tsv: Option<PathBuf>,

    /// Write extracted references to this JSONL file
    #[arg(long)]
    pub output_refs: Option<PathBuf>,

    /// Model directory holding a model_config.json
    #[arg(long)]
    pub model_dir: Option<PathBuf>,

    /// Cue score a line needs to count as a reference
    #[arg(long, default_value_t = 3)]
    pub threshold: u32,
}

impl From<SplitArgs> for SplitConfig {
    fn from(a: SplitArgs) -> Self {
        SplitConfig {
            input:       a.input,
            output_tsv:  a.output_tsv,
            output_refs: a.output_refs,
            model_dir:   a.model_dir,
            threshold:   a.threshold,
        }
    }
}

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Text file (or directory) with one reference per line
    pub input: String,

    /// Write parsed references to this JSONL file
    #[arg(long)]
    pub output_jsonl: Option<PathBuf>,

    /// Write token/label rows to this TSV file
    #[arg(long)]
    pub output_tsv: Option<PathBuf>,

    /// Model directory holding a model_config.json
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
}

impl From<ParseArgs> for ParseConfig {
    fn from(a: ParseArgs) -> Self {
        ParseConfig {
            input:        a.input,
            output_jsonl: a.output_jsonl,
            output_tsv:   a.output_tsv,
            model_dir:    a.model_dir,
        }
    }
}

/// Arguments for the `convert` command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Annotated JSONL dataset(s); several merge into one multi-
    /// label TSV
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output TSV path
    #[arg(long, default_value = "out.tsv")]
    pub output: PathBuf,

    /// Maximum number of tokens per example
    #[arg(long, default_value_t = 250)]
    pub line_limit: usize,

    /// End examples at line endings in the text
    #[arg(long, short = 'r')]
    pub respect_lines: bool,

    /// Flow documents into each other instead of ending examples
    /// at document boundaries
    #[arg(long)]
    pub ignore_doc_endings: bool,

    /// Hold out this fraction of examples as a test set
    #[arg(long, default_value_t = 0.0)]
    pub test_fraction: f64,

    /// Shuffle seed for a reproducible train/test split
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<ConvertArgs> for ConvertConfig {
    fn from(a: ConvertArgs) -> Self {
        ConvertConfig {
            inputs:               a.inputs,
            output:               a.output,
            line_limit:           a.line_limit,
            respect_line_endings: a.respect_lines,
            respect_doc_endings:  !a.ignore_doc_endings,
            test_fraction:        a.test_fraction,
            seed:                 a.seed,
        }
    }
}

/// Arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Gold-annotated token/label TSV
    pub gold: PathBuf,

    /// Predicted token/label TSV
    pub predicted: PathBuf,

    /// Where to write the report CSV
    #[arg(long, default_value = "report.csv")]
    pub report: PathBuf,

    /// Label column to score (0 is the first label column)
    #[arg(long, default_value_t = 0)]
    pub label_column: usize,
}

impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            gold:         a.gold,
            predicted:    a.predicted,
            report:       a.report,
            label_column: a.label_column,
        }
    }
}

/// Arguments for the `fetch` command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Remote directory the artefacts are published under
    #[arg(long)]
    pub base_url: String,

    /// Local model directory to download into
    #[arg(long, default_value = "models/latest")]
    pub model_dir: PathBuf,

    /// Task the model directory serves ('splitting' or 'parsing')
    #[arg(long, default_value = "splitting")]
    pub task: Task,

    /// Specific artefacts to fetch (default: the standard set)
    #[arg(long)]
    pub artefacts: Vec<String>,
}
