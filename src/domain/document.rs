// ============================================================
// Layer 3 - Document Domain Types
// ============================================================
// Two document shapes flow through the system:
//
//   Document     - plain text loaded from disk, one per file.
//                  By the time a Document exists, any format
//                  extraction has already happened.
//
//   AnnotatedDoc - a token-annotated document as produced by
//                  an annotation tool. Tokens carry character
//                  offsets and a position id; spans carry a
//                  label per token. This is the input format
//                  for the `convert` command.
//
// Reference: Prodigy annotation format (tokens / spans / _input_hash)

use serde::{Deserialize, Serialize};

/// A raw document loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The filename or path, kept for traceability so we know
    /// which file a labelled span came from
    pub source: String,

    /// The full text content of the document
    pub text: String,
}

impl Document {
    /// Create a new Document with a source path and text content.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }
}

/// One token of an annotated document, with character offsets
/// into the document text and a sequential position id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text:  String,
    pub start: usize,
    pub end:   usize,
    pub id:    usize,
}

/// A token-level span annotation. `token_start` and `token_end`
/// are indices into the document's token list (inclusive), while
/// `start` and `end` are character offsets into the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanAnnotation {
    pub start:       usize,
    pub end:         usize,
    pub token_start: usize,
    pub token_end:   usize,
    pub label:       String,
}

/// A token-annotated document.
///
/// When the data has been fully labelled, every token is covered
/// by exactly one single-token span, so token i pairs with span i.
/// Documents prepared for prediction carry no spans at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDoc {
    #[serde(default)]
    pub text: String,

    pub tokens: Vec<Token>,

    /// Absent for prediction-time data
    #[serde(default)]
    pub spans: Option<Vec<SpanAnnotation>>,

    /// Stable hash of the input text, assigned by the annotation
    /// tool. Used to match the same document across independently
    /// labelled datasets.
    #[serde(rename = "_input_hash")]
    pub input_hash: i64,
}

impl AnnotatedDoc {
    /// Tokens sorted by their position id. Annotation tools should
    /// already emit them sorted, but the merge logic depends on it,
    /// so we never assume.
    pub fn sorted_tokens(&self) -> Vec<Token> {
        let mut tokens = self.tokens.clone();
        tokens.sort_by_key(|t| t.id);
        tokens
    }

    /// Spans sorted by their first covered token, if any exist.
    pub fn sorted_spans(&self) -> Option<Vec<SpanAnnotation>> {
        self.spans.as_ref().map(|spans| {
            let mut spans = spans.clone();
            spans.sort_by_key(|s| s.token_start);
            spans
        })
    }

    /// The plain token texts, in position order.
    pub fn token_texts(&self) -> Vec<String> {
        self.sorted_tokens().into_iter().map(|t| t.text).collect()
    }
}
