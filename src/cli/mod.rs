// ============================================================
// Layer 1 - CLI
// ============================================================
// Thin dispatch layer: parse the command line, hand the request
// to the matching use case, print a short summary of what it
// produced. All real work happens in Layer 2.

pub mod commands;

use anyhow::Result;
use clap::Parser;

use crate::application::convert_use_case::ConvertUseCase;
use crate::application::evaluate_use_case::EvaluateUseCase;
use crate::application::parse_use_case::ParseUseCase;
use crate::application::split_use_case::SplitUseCase;
use crate::infra::artefacts::{ArtefactStore, DEFAULT_ARTEFACTS};
use crate::infra::model_config::{ModelConfig, CONFIG_FILE};
use commands::{Commands, ConvertArgs, EvaluateArgs, FetchArgs, ParseArgs, SplitArgs};

/// Find and parse reference spans in policy documents
#[derive(Parser, Debug)]
#[command(name = "refspan", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args)    => run_split(args),
            Commands::Parse(args)    => run_parse(args),
            Commands::Convert(args)  => run_convert(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Fetch(args)    => run_fetch(args),
        }
    }
}

fn run_split(args: SplitArgs) -> Result<()> {
    let summary = SplitUseCase::new(args.into()).execute()?;

    println!(
        "Found {} reference(s) in {} line(s) across {} document(s)",
        summary.references.len(),
        summary.lines,
        summary.documents
    );
    for reference in &summary.references {
        println!("  [line {}] {}", reference.line, reference.text);
    }
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let parsed = ParseUseCase::new(args.into()).execute()?;

    println!("Parsed {} reference(s)", parsed.len());
    for reference in &parsed {
        let year = reference
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  authors: {} | year: {} | title: {}", reference.authors, year, reference.title);
    }
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let summary = ConvertUseCase::new(args.into()).execute()?;

    println!(
        "Converted {} document(s) into {} example(s)",
        summary.documents, summary.examples
    );
    for path in &summary.written {
        println!("  wrote {}", path.display());
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let report_path = args.report.clone();
    let report = EvaluateUseCase::new(args.into()).execute()?;

    println!(
        "Accuracy {:.4} over {} token(s), report written to {}",
        report.accuracy,
        report.tokens,
        report_path.display()
    );
    for class in &report.classes {
        println!(
            "  {:<10} p {:.4} r {:.4} f1 {:.4} ({})",
            class.label, class.precision, class.recall, class.f1, class.support
        );
    }
    Ok(())
}

fn run_fetch(args: FetchArgs) -> Result<()> {
    let store = ArtefactStore::new(&args.model_dir, args.base_url.as_str());

    let artefacts: Vec<&str> = if args.artefacts.is_empty() {
        DEFAULT_ARTEFACTS.to_vec()
    } else {
        args.artefacts.iter().map(String::as_str).collect()
    };

    let downloaded = store.ensure_all(&artefacts)?;
    println!(
        "{} of {} artefact(s) downloaded into {}",
        downloaded,
        artefacts.len(),
        args.model_dir.display()
    );

    // A model directory without a config cannot serve split/parse;
    // write the task default when none was fetched
    if !args.model_dir.join(CONFIG_FILE).exists() {
        ModelConfig::for_task(args.task).save(&args.model_dir)?;
        println!(
            "Wrote default {} to {}",
            CONFIG_FILE,
            args.model_dir.display()
        );
    }
    Ok(())
}
