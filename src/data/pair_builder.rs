// ============================================================
// Layer 4 - Token/Label Pair Builder
// ============================================================
// Flattens annotated documents into a stream of (token, label)
// pairs, inserting boundary markers where training examples end.
//
// Three settings control the flattening:
//
//   line_limit           Maximum tokens per example. Long flows
//                        of text are cut into windows of at most
//                        this many tokens. Must match the window
//                        size the downstream model was built for.
//
//   respect_line_endings When on, newline tokens in the text end
//                        the current example. This gives much
//                        shorter examples (often under 10 tokens)
//                        and usually a worse model, but matches
//                        the line-per-example corpus convention.
//
//   respect_doc_endings  When on, a boundary is emitted at the
//                        end of each document so one document
//                        never bleeds into the next.
//
// Labels are positional: fully annotated documents carry one
// single-token span per token, so token i takes its label from
// span i. Documents without spans (prediction data) produce
// unlabelled pairs.

use crate::domain::document::AnnotatedDoc;

/// One output pair. A boundary pair has no token and no label and
/// becomes an all-empty TSV row downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub token: Option<String>,
    pub label: Option<String>,
}

impl Pair {
    pub fn boundary() -> Self {
        Self { token: None, label: None }
    }

    pub fn is_boundary(&self) -> bool {
        self.token.is_none()
    }
}

pub struct PairBuilder {
    line_limit:           usize,
    respect_line_endings: bool,
    respect_doc_endings:  bool,
    // Running stats, reported after a run
    line_count:   usize,
    line_lengths: Vec<usize>,
}

impl PairBuilder {
    pub fn new(line_limit: usize, respect_line_endings: bool, respect_doc_endings: bool) -> Self {
        Self {
            line_limit,
            respect_line_endings,
            respect_doc_endings,
            line_count:   0,
            line_lengths: Vec::new(),
        }
    }

    /// Flatten a whole dataset and log summary stats.
    pub fn run(&mut self, docs: &[AnnotatedDoc]) -> Vec<Pair> {
        let mut out = Vec::new();
        for doc in docs {
            out.extend(self.pairs(doc));
        }

        let mean_len = if self.line_lengths.is_empty() {
            0.0
        } else {
            self.line_lengths.iter().sum::<usize>() as f64 / self.line_lengths.len() as f64
        };
        tracing::debug!(
            "Flattened {} examples, average example length {:.2}",
            self.line_count,
            mean_len
        );

        out
    }

    /// Flatten one document into pairs.
    pub fn pairs(&mut self, doc: &AnnotatedDoc) -> Vec<Pair> {
        let tokens = doc.sorted_tokens();
        let spans  = doc.sorted_spans();

        let doc_len = tokens.len();
        let mut token_counter = 0usize;
        let mut out = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            // 1-based position, the final token is position doc_len
            let pos = i + 1;

            // Positional label lookup. Under-annotated documents
            // yield unlabelled pairs rather than a panic.
            let label = spans
                .as_ref()
                .and_then(|s| s.get(i))
                .map(|s| s.label.clone());

            let text = token.text.as_str();

            if text.is_empty() {
                // Empty tokens carry nothing, labelled or not
                continue;
            }

            if text.contains('\n') && self.respect_line_endings {
                // A newline token ends the example. Whitespace-only
                // newline tokens become a boundary; anything else is
                // dropped with the line ending it carries.
                if text.trim().is_empty() {
                    out.push(Pair::boundary());
                }
                self.close_example(token_counter);
                token_counter = 0;
            } else if token_counter == self.line_limit {
                // Window full: boundary first, then this token opens
                // the next window
                out.push(Pair::boundary());
                out.push(Pair {
                    token: Some(text.trim().to_string()),
                    label,
                });
                self.close_example(token_counter);
                token_counter = 1;
            } else if pos == doc_len && self.respect_doc_endings {
                // End of document inside the window: emit the token,
                // then a boundary so the next document starts fresh
                out.push(Pair {
                    token: Some(text.trim().to_string()),
                    label,
                });
                out.push(Pair::boundary());
                self.close_example(token_counter);
            } else {
                out.push(Pair {
                    token: Some(text.trim().to_string()),
                    label,
                });
                token_counter += 1;
            }
        }

        out
    }

    fn close_example(&mut self, length: usize) {
        self.line_lengths.push(length);
        self.line_count += 1;
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{SpanAnnotation, Token};

    fn doc(texts: &[&str], labels: Option<&[&str]>) -> AnnotatedDoc {
        let tokens = texts
            .iter()
            .enumerate()
            .map(|(id, t)| Token { text: t.to_string(), start: 0, end: 0, id })
            .collect();
        let spans = labels.map(|ls| {
            ls.iter()
                .enumerate()
                .map(|(i, l)| SpanAnnotation {
                    start:       0,
                    end:         0,
                    token_start: i,
                    token_end:   i,
                    label:       l.to_string(),
                })
                .collect()
        });
        AnnotatedDoc { text: String::new(), tokens, spans, input_hash: 0 }
    }

    fn tokens_of(pairs: &[Pair]) -> Vec<Option<&str>> {
        pairs.iter().map(|p| p.token.as_deref()).collect()
    }

    #[test]
    fn test_doc_ending_appends_boundary() {
        let mut b = PairBuilder::new(250, false, true);
        let pairs = b.pairs(&doc(&["a", "b"], Some(&["o", "b-r"])));
        assert_eq!(tokens_of(&pairs), vec![Some("a"), Some("b"), None]);
        assert_eq!(pairs[1].label.as_deref(), Some("b-r"));
    }

    #[test]
    fn test_no_doc_ending_flows_on() {
        let mut b = PairBuilder::new(250, false, false);
        let pairs = b.pairs(&doc(&["a", "b"], None));
        assert_eq!(tokens_of(&pairs), vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_line_limit_splits_window() {
        let mut b = PairBuilder::new(2, false, false);
        let pairs = b.pairs(&doc(&["a", "b", "c"], None));
        // Two tokens fill the window, the boundary lands before "c"
        assert_eq!(tokens_of(&pairs), vec![Some("a"), Some("b"), None, Some("c")]);
    }

    #[test]
    fn test_newline_token_respected() {
        let mut b = PairBuilder::new(250, true, false);
        let pairs = b.pairs(&doc(&["a", "\n", "b"], None));
        assert_eq!(tokens_of(&pairs), vec![Some("a"), None, Some("b")]);
    }

    #[test]
    fn test_newline_token_ignored_when_not_respected() {
        let mut b = PairBuilder::new(250, false, false);
        let pairs = b.pairs(&doc(&["a", "\n", "b"], None));
        // The newline token still ends up in the stream, trimmed
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1].token.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_tokens_skipped() {
        let mut b = PairBuilder::new(250, false, false);
        let pairs = b.pairs(&doc(&["a", "", "b"], None));
        assert_eq!(tokens_of(&pairs), vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_unannotated_doc_has_no_labels() {
        let mut b = PairBuilder::new(250, false, true);
        let pairs = b.pairs(&doc(&["a"], None));
        assert!(pairs[0].label.is_none());
    }
}
