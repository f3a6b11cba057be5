use serde::{Deserialize, Serialize};

/// One reference span found by the splitting task.
/// Token positions are indices into the line's token sequence
/// and the span is inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub text:        String,
    pub line:        usize,
    pub token_start: usize,
    pub token_end:   usize,
}

impl Reference {
    pub fn span_length(&self) -> usize {
        self.token_end.saturating_sub(self.token_start) + 1
    }
}

/// One reference after component labelling by the parsing task.
/// Components absent from the reference stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedReference {
    pub raw:     String,
    pub authors: String,
    pub title:   String,
    pub year:    Option<u16>,
}

impl ParsedReference {
    /// A parse is informative when at least one component was found
    pub fn has_components(&self) -> bool {
        !self.authors.is_empty() || !self.title.is_empty() || self.year.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_length_inclusive() {
        let r = Reference {
            text:        "WHO 2016".to_string(),
            line:        0,
            token_start: 3,
            token_end:   4,
        };
        assert_eq!(r.span_length(), 2);
    }

    #[test]
    fn test_empty_parse_has_no_components() {
        let p = ParsedReference {
            raw:     "???".to_string(),
            authors: String::new(),
            title:   String::new(),
            year:    None,
        };
        assert!(!p.has_components());
    }
}
