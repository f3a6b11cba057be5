// ============================================================
// Layer 3 - Label Vocabulary
// ============================================================
// The two labelling tasks use different tag sets:
//
//   Splitting (find reference spans in running text):
//     o     outside any reference
//     b-r   first token of a reference
//     i-r   subsequent token of the same reference
//
//   Parsing (label the components of one reference):
//     author / title / year / o
//
// The splitting tags follow the IOB2 convention: every span
// starts with a `b-` tag and continues with `i-` tags of the
// same class.
//
// Reference: Ramshaw & Marcus (1995), text chunking tag schemes

use serde::{Deserialize, Serialize};

/// Tag for a token outside any span, shared by both tasks
pub const OUTSIDE: &str = "o";

/// Span class of a reference, the "r" in "b-r" / "i-r"
pub const REF_CLASS: &str = "r";

/// First token of a reference span (splitting task)
pub const BEGIN_REF: &str = "b-r";

/// Continuation token of a reference span (splitting task)
pub const INSIDE_REF: &str = "i-r";

/// The component labels assigned by the parsing task
pub const PARSE_LABELS: [&str; 4] = ["author", "title", "year", OUTSIDE];

/// Which labelling task a model directory or command is set up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Locate reference spans within document text
    Splitting,
    /// Label the components of individual references
    Parsing,
}

impl Task {
    /// The full tag vocabulary for this task
    pub fn labels(&self) -> Vec<String> {
        match self {
            Task::Splitting => vec![
                OUTSIDE.to_string(),
                BEGIN_REF.to_string(),
                INSIDE_REF.to_string(),
            ],
            Task::Parsing => PARSE_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl std::str::FromStr for Task {
    type Err = String;

    /// Accepts the task name or the CLI verb it serves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "splitting" | "split" => Ok(Task::Splitting),
            "parsing" | "parse"   => Ok(Task::Parsing),
            other => Err(format!("unknown task '{other}' (use 'splitting' or 'parsing')")),
        }
    }
}

/// Where a tag sits relative to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Begin,
    Inside,
    Outside,
}

/// Split a tag string into its IOB prefix and class.
///
/// "b-r"    -> (Begin,   Some("r"))
/// "i-r"    -> (Inside,  Some("r"))
/// "o"      -> (Outside, None)
/// "author" -> (Inside,  Some("author"))
///
/// Plain class labels (the parsing task) carry no prefix; they are
/// treated as Inside so that a run of equal labels forms one span.
pub fn parse_tag(tag: &str) -> (Prefix, Option<&str>) {
    if tag == OUTSIDE || tag.is_empty() {
        return (Prefix::Outside, None);
    }
    match tag.split_once('-') {
        Some(("b", class)) => (Prefix::Begin, Some(class)),
        Some(("i", class)) => (Prefix::Inside, Some(class)),
        // No recognised prefix: a bare class label
        _ => (Prefix::Inside, Some(tag)),
    }
}
