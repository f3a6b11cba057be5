// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between files on disk and label-ready token lines.
//
// The conversion pipeline flows in this order:
//
//   annotated .jsonl files
//       |
//       v
//   jsonl             -> reads one document per line
//       |
//       v
//   validate          -> checks datasets cover the same docs/tokens
//       |
//       v
//   PairBuilder       -> flattens docs into (token, label) pairs
//       |
//       v
//   splitter          -> optional shuffled train/test split
//       |
//       v
//   tsv               -> writes token/label rows
//
// The labelling pipeline (split/parse commands) uses:
//
//   loader -> preprocessor -> tokenize -> (Layer 5 labelling)
//
// Each module is responsible for exactly one step, so each step
// is independently testable and replaceable.

/// Loads plain-text documents from a file or directory
pub mod loader;

/// Cleans and normalises extracted document text
pub mod preprocessor;

/// Word-level tokenization with character offsets
pub mod tokenize;

/// Reads and writes JSON-lines files
pub mod jsonl;

/// Reads and writes token/label TSV files
pub mod tsv;

/// Flattens annotated documents into token/label pairs
pub mod pair_builder;

/// Cross-dataset compatibility checks and label merging
pub mod validate;

/// Shuffles and splits sequences into train/test sets
pub mod splitter;
