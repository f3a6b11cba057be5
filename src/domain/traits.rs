// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types, the
// application layer can swap implementations without changing
// the code that uses them:
//   - TextLoader implements DocumentSource
//   - a future JsonlLoader could also implement DocumentSource
//   - the use cases only see DocumentSource
//
// The same seam exists for labelling: the rule-based labellers
// shipped here and any model-backed labeller loaded from fetched
// artefacts both fit behind TokenLabeller.

use anyhow::Result;
use crate::domain::document::Document;

// --- DocumentSource ----------------------------------------------------------
/// Any component that can load documents from a source.
///
/// Implementations:
///   - TextLoader -> loads .txt files from a file or directory
pub trait DocumentSource {
    /// Load all available documents from this source.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// --- TokenLabeller -----------------------------------------------------------
/// Any component that can assign one label per token, line by line.
///
/// Implementations:
///   - ReferenceSplitter -> o / b-r / i-r span tags
///   - ComponentParser   -> author / title / year / o labels
pub trait TokenLabeller {
    /// Label every token of every line. The output must mirror the
    /// input shape exactly: one tag string per token per line.
    fn label(&self, lines: &[Vec<String>]) -> Result<Vec<Vec<String>>>;
}
