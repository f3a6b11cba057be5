// ============================================================
// Layer 5 - Rule-Based Labellers
// ============================================================
// Deterministic TokenLabeller implementations for both tasks.
//
// ReferenceSplitter scores each line against cues that are
// common in bibliography entries and rare in running prose:
//
//   - a publication-year token (1800..2099)
//   - "et al"
//   - author initials ("J" followed by ".")
//   - page / volume / identifier markers (pp., vol., doi, http)
//   - high punctuation density
//   - a high share of capitalised words
//
// A line at or above the score threshold is tagged as one
// reference span (b-r i-r i-r ...); every other line is all o.
// Lines shorter than MIN_LINE_TOKENS never qualify: fragments
// like page numbers score on digits alone.
//
// ComponentParser labels one reference per line with the parsing
// label set. Block boundaries are positional: the author block
// runs from the start to the first year token (or to the period
// closing the initials), the title is the first sentence-like
// run after it, year tokens are labelled wherever they appear.

use anyhow::Result;

use crate::domain::label::{OUTSIDE, REF_CLASS};
use crate::domain::traits::TokenLabeller;
use crate::labelling::decode::{spans_to_tags, TagSpan};

/// Lines shorter than this never count as references
const MIN_LINE_TOKENS: usize = 4;

/// Author blocks longer than this are implausible and rejected
const MAX_AUTHOR_TOKENS: usize = 16;

/// Parse a token as a plausible publication year
fn year_value(token: &str) -> Option<u16> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u16 = token.parse().ok()?;
    (1800..=2099).contains(&year).then_some(year)
}

/// A single uppercase letter, as produced by tokenizing "J."
fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn is_punct(token: &str) -> bool {
    token.chars().all(|c| !c.is_alphanumeric())
}

// --- ReferenceSplitter -------------------------------------------------------

pub struct ReferenceSplitter {
    /// Minimum cue score for a line to be tagged as a reference
    threshold: u32,
}

impl ReferenceSplitter {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Cue score for one line of tokens
    pub fn score(&self, tokens: &[String]) -> u32 {
        if tokens.len() < MIN_LINE_TOKENS {
            return 0;
        }

        let mut score = 0u32;

        if tokens.iter().any(|t| year_value(t).is_some()) {
            score += 2;
        }

        // "et al" in either casing
        let has_etal = tokens
            .windows(2)
            .any(|w| w[0].eq_ignore_ascii_case("et") && w[1].eq_ignore_ascii_case("al"));
        if has_etal {
            score += 2;
        }

        // An initial followed by its period
        let has_initials = tokens
            .windows(2)
            .any(|w| is_initial(&w[0]) && w[1] == ".");
        if has_initials {
            score += 1;
        }

        let has_marker = tokens.iter().any(|t| {
            let t = t.to_ascii_lowercase();
            t == "pp" || t == "vol" || t == "doi" || t.starts_with("http") || t.contains("doi.org")
        });
        if has_marker {
            score += 2;
        }

        let punct = tokens.iter().filter(|t| *t == "," || *t == "." || *t == ";").count();
        if punct as f64 / tokens.len() as f64 >= 0.15 {
            score += 1;
        }

        let words: Vec<&String> = tokens
            .iter()
            .filter(|t| t.chars().next().is_some_and(|c| c.is_alphabetic()))
            .collect();
        let capitalised = words
            .iter()
            .filter(|t| t.chars().next().is_some_and(|c| c.is_uppercase()))
            .count();
        if !words.is_empty() && capitalised as f64 / words.len() as f64 >= 0.4 {
            score += 1;
        }

        score
    }
}

impl Default for ReferenceSplitter {
    fn default() -> Self {
        // One strong cue plus one weak one
        Self::new(3)
    }
}

impl TokenLabeller for ReferenceSplitter {
    fn label(&self, lines: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        let tagged = lines
            .iter()
            .map(|tokens| {
                if !tokens.is_empty() && self.score(tokens) >= self.threshold {
                    // The whole line is one reference span
                    let span = TagSpan {
                        class: REF_CLASS.to_string(),
                        start: 0,
                        end:   tokens.len() - 1,
                    };
                    spans_to_tags(tokens.len(), &[span], OUTSIDE)
                } else {
                    vec![OUTSIDE.to_string(); tokens.len()]
                }
            })
            .collect();
        Ok(tagged)
    }
}

// --- ComponentParser ---------------------------------------------------------

pub struct ComponentParser;

impl ComponentParser {
    pub fn new() -> Self {
        Self
    }

    fn label_line(&self, tokens: &[String]) -> Vec<String> {
        let n = tokens.len();
        let mut tags = vec![OUTSIDE.to_string(); n];
        if n == 0 {
            return tags;
        }

        // Year tokens are labelled wherever they appear
        for (i, token) in tokens.iter().enumerate() {
            if year_value(token).is_some() {
                tags[i] = "year".to_string();
            }
        }
        let first_year = tokens.iter().position(|t| year_value(t).is_some());

        // Author block: from the start to the year when the year
        // appears early (author-date style), otherwise to the period
        // closing the initials. No initials and no early year means
        // no author block at all.
        let author_end = match first_year {
            Some(y) if y <= n / 2 && y <= MAX_AUTHOR_TOKENS => Some(y),
            _ => closing_initial_period(tokens).map(|i| i + 1),
        };

        let mut title_start = 0;
        if let Some(end) = author_end {
            let end = end.min(n);
            // Trim punctuation-only tokens from the edges of the block
            let mut last = end;
            while last > 0 && is_punct(&tokens[last - 1]) && tokens[last - 1] != "." {
                last -= 1;
            }
            for tag in tags.iter_mut().take(last) {
                if tag == OUTSIDE {
                    *tag = "author".to_string();
                }
            }
            title_start = end;
        }

        // Title: the first sentence-like run after the author block,
        // skipping separator punctuation and year parentheses
        while title_start < n && (is_punct(&tokens[title_start]) || tags[title_start] == "year") {
            title_start += 1;
        }

        let mut title_end = title_start;
        let mut content = 0usize;
        while title_end < n {
            let token = &tokens[title_end];
            if token == "." && content >= 2 {
                break;
            }
            if tags[title_end] == "year" {
                break;
            }
            if !is_punct(token) {
                content += 1;
            }
            title_end += 1;
        }

        // A one-word "title" is noise, extend to the end instead
        if content < 2 {
            title_end = n;
        }

        for i in title_start..title_end {
            if tags[i] == OUTSIDE {
                tags[i] = "title".to_string();
            }
        }

        tags
    }
}

impl Default for ComponentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the "." token that closes the last initial in the
/// leading author block, if the line starts with an author list.
fn closing_initial_period(tokens: &[String]) -> Option<usize> {
    let mut result = None;
    for (i, pair) in tokens.windows(2).enumerate() {
        if i > MAX_AUTHOR_TOKENS {
            break;
        }
        if is_initial(&pair[0]) && pair[1] == "." {
            result = Some(i + 1);
        }
    }
    result
}

impl TokenLabeller for ComponentParser {
    fn label(&self, lines: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        Ok(lines.iter().map(|tokens| self.label_line(tokens)).collect())
    }
}
