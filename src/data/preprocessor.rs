// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Cleans document text before tokenization.
//
// Text extracted from published policy documents usually carries
// artefacts of the extraction step:
//   - Non-breaking spaces (U+00A0) from layout software
//   - Zero-width spaces (U+200B) and BOMs from copy-pasting
//   - Soft hyphens (U+00AD) left over from line-break hyphenation
//   - Form feeds (U+000C) marking page breaks
//   - Carriage returns (\r) from Windows line endings
//   - Runs of spaces from column alignment
//
// Left in place, these end up inside tokens and split reference
// strings in unpredictable places.
//
// Cleaning steps (applied in order):
//   1. Normalise or drop problem characters
//   2. Collapse runs of spaces and trim each line
//   3. Collapse more than one consecutive blank line

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string for downstream tokenization.
    pub fn clean(&self, text: &str) -> String {
        // -- Step 1: normalise individual characters --------------------------
        let step1: String = text
            .chars()
            .filter_map(|c| match c {
                '\t' => Some(' '),
                // Non-breaking space, zero-width space, BOM
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => Some(' '),
                // Soft hyphen: the word was split by layout, drop it entirely
                // so "pro\u{00AD}gramme" rejoins as "programme"
                '\u{00AD}' => None,
                // Page break becomes a line break
                '\u{000C}' => Some('\n'),
                '\r' => Some('\n'),
                c if c.is_control() && c != '\n' => Some(' '),
                c => Some(c),
            })
            .collect();

        // -- Step 2: clean each line individually -----------------------------
        // Line structure matters downstream (the splitting labeller works
        // per line), so lines are cleaned independently.
        let step2: String = step1
            .lines()
            .map(|line| {
                let mut out        = String::with_capacity(line.len());
                let mut last_space = false;

                for c in line.chars() {
                    if c == ' ' {
                        if !last_space {
                            out.push(' ');
                        }
                        last_space = true;
                    } else {
                        out.push(c);
                        last_space = false;
                    }
                }

                out.trim().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n");

        // -- Step 3: collapse excessive blank lines ----------------------------
        // Allow at most one blank line (two consecutive newlines)
        let mut result        = String::with_capacity(step2.len());
        let mut newline_count = 0usize;

        for c in step2.chars() {
            if c == '\n' {
                newline_count += 1;
                if newline_count <= 2 {
                    result.push(c);
                }
            } else {
                newline_count = 0;
                result.push(c);
            }
        }

        result.trim().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("Smith,   J.  2019"), "Smith, J. 2019");
    }

    #[test]
    fn test_rejoins_soft_hyphenated_words() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("pro\u{00AD}gramme"), "programme");
    }

    #[test]
    fn test_page_break_becomes_line_break() {
        let p = Preprocessor::new();
        let cleaned = p.clean("end of page\u{000C}References");
        assert_eq!(cleaned, "end of page\nReferences");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_collapses_blank_lines() {
        let p      = Preprocessor::new();
        let output = p.clean("line1\n\n\n\n\nline2");
        assert!(!output.contains("\n\n\n"));
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }
}
