// ============================================================
// Layer 4 - Word Tokenizer
// ============================================================
// Splits cleaned text into word-level tokens with byte offsets.
//
// Reference strings are dense with punctuation that carries
// signal for the labellers ("Smith, J. (2019). Title. pp. 4-7."),
// so punctuation at the edges of a word becomes its own token
// while internal punctuation is kept:
//
//   "Smith,"     -> "Smith" ","
//   "(2019)."    -> "(" "2019" ")" "."
//   "drug-resistant" -> "drug-resistant"    (internal hyphen kept)
//   "et al."     -> "et" "al" "."
//
// This is deliberately not a subword or model tokenizer. It only
// has to produce stable word units for rule matching and TSV rows.

use crate::domain::document::Token;

/// Characters treated as detachable when they appear at the edge
/// of a whitespace-delimited word
fn is_edge_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}'
            | '"' | '\'' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'
            | '?' | '!' | '&' | '*'
    )
}

/// Tokenize one line of text into offset-carrying tokens.
/// Token ids are sequential within the line, starting at 0.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (word_start, word) in split_whitespace_indexed(line) {
        // Peel punctuation off the front
        let mut inner_start = 0usize;
        for c in word.chars() {
            if is_edge_punct(c) {
                push_token(&mut tokens, c.to_string(), word_start + inner_start);
                inner_start += c.len_utf8();
            } else {
                break;
            }
        }

        // Peel punctuation off the back (collected in reverse first)
        let rest = &word[inner_start..];
        let mut tail = Vec::new();
        let mut inner_end = rest.len();
        for c in rest.chars().rev() {
            if is_edge_punct(c) {
                inner_end -= c.len_utf8();
                tail.push((c, inner_end));
            } else {
                break;
            }
        }

        let core = &rest[..inner_end];
        if !core.is_empty() {
            push_token(&mut tokens, core.to_string(), word_start + inner_start);
        }

        for (c, offset) in tail.into_iter().rev() {
            push_token(&mut tokens, c.to_string(), word_start + inner_start + offset);
        }
    }

    tokens
}

/// Tokenize a whole document, one token vector per line.
/// Blank lines produce empty vectors so line numbering is stable.
pub fn tokenize_lines(text: &str) -> Vec<Vec<Token>> {
    text.lines().map(tokenize_line).collect()
}

fn push_token(tokens: &mut Vec<Token>, text: String, start: usize) {
    let end = start + text.len();
    let id  = tokens.len();
    tokens.push(Token { text, start, end, id });
}

/// Like split_whitespace but yielding the byte offset of each word
fn split_whitespace_indexed(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace().map(move |w| {
        // Offset of this word slice within the original line
        let offset = w.as_ptr() as usize - line.as_ptr() as usize;
        (offset, w)
    })
}
