// ============================================================
// Layer 5 - Tag Sequence Decoding
// ============================================================
// Converts between per-token tag sequences and token spans.
//
// Decoding walks the tags once, opening a span on a b- tag (or
// on an i- tag with no span open, or with a different class than
// the open one) and closing it on an o tag or at the end of the
// sequence. Bare class labels (the parsing task) decode the same
// way: a run of equal labels is one span.

use crate::domain::document::Token;
use crate::domain::label::{parse_tag, Prefix};
use crate::domain::reference::Reference;

/// A decoded span: class, first token index, last token index
/// (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    pub class: String,
    pub start: usize,
    pub end:   usize,
}

/// Decode a tag sequence into spans.
pub fn tag_spans(tags: &[String]) -> Vec<TagSpan> {
    let mut spans = Vec::new();
    let mut open: Option<TagSpan> = None;

    for (i, tag) in tags.iter().enumerate() {
        match parse_tag(tag) {
            (Prefix::Outside, _) => {
                if let Some(span) = open.take() {
                    spans.push(span);
                }
            }
            (Prefix::Begin, Some(class)) => {
                if let Some(span) = open.take() {
                    spans.push(span);
                }
                open = Some(TagSpan { class: class.to_string(), start: i, end: i });
            }
            (Prefix::Inside, Some(class)) => match open.as_mut() {
                Some(span) if span.class == class => span.end = i,
                _ => {
                    // i- without a matching open span starts one
                    if let Some(span) = open.take() {
                        spans.push(span);
                    }
                    open = Some(TagSpan { class: class.to_string(), start: i, end: i });
                }
            },
            // parse_tag never yields Begin/Inside without a class
            _ => {}
        }
    }

    if let Some(span) = open {
        spans.push(span);
    }

    spans
}

/// Encode spans over a sequence of `len` tokens as IOB2 tags.
/// Tokens outside every span take the `outside` tag.
pub fn spans_to_tags(len: usize, spans: &[TagSpan], outside: &str) -> Vec<String> {
    let mut tags = vec![outside.to_string(); len];
    for span in spans {
        for i in span.start..=span.end.min(len.saturating_sub(1)) {
            tags[i] = if i == span.start {
                format!("b-{}", span.class)
            } else {
                format!("i-{}", span.class)
            };
        }
    }
    tags
}

/// Rebuild the reference strings found on one line. The span text
/// is sliced from the original line using token offsets so that
/// punctuation spacing is preserved exactly.
pub fn extract_references(
    line_text: &str,
    tokens:    &[Token],
    tags:      &[String],
    line_no:   usize,
) -> Vec<Reference> {
    tag_spans(tags)
        .into_iter()
        .filter_map(|span| {
            let first = tokens.get(span.start)?;
            let last  = tokens.get(span.end)?;
            let text  = line_text.get(first.start..last.end)?.to_string();
            Some(Reference {
                text,
                line:        line_no,
                token_start: span.start,
                token_end:   span.end,
            })
        })
        .collect()
}
