// ============================================================
// Layer 4 - Document Loader
// ============================================================
// Loads plain-text documents for the split command.
//
// The loader accepts either:
//   - a single file path            -> one Document
//   - a directory path              -> one Document per .txt file
//
// Policy documents arrive here as text already extracted from
// whatever container they were published in (PDF, Word, HTML).
// Extraction is out of scope for this tool; the preprocessor
// cleans up the usual extraction artefacts afterwards.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Loads text documents from a file or a directory of .txt files.
/// Implements the DocumentSource trait from Layer 3.
pub struct TextLoader {
    /// Path to a text file or a directory containing .txt files
    path: String,
}

impl TextLoader {
    /// Create a new TextLoader pointed at a file or directory
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for TextLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        let path = Path::new(&self.path);

        if path.is_file() {
            return Ok(vec![load_single_text(path)?]);
        }

        if !path.exists() {
            anyhow::bail!("Input path '{}' does not exist", self.path);
        }

        let mut docs = Vec::new();

        for entry in fs::read_dir(path)
            .with_context(|| format!("Cannot read directory '{}'", self.path))?
        {
            let entry = entry?;
            let path  = entry.path();

            // Only process files with the .txt extension
            if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                match load_single_text(&path) {
                    Ok(doc) => {
                        tracing::debug!("Loaded: {} ({} chars)", doc.source, doc.text.len());
                        docs.push(doc);
                    }
                    // Log a warning but continue, one unreadable file
                    // should not abort the whole run
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {}", path.display(), e);
                    }
                }
            }
        }

        // Deterministic order regardless of directory iteration order
        docs.sort_by(|a, b| a.source.cmp(&b.source));

        tracing::info!("Loaded {} documents", docs.len());
        Ok(docs)
    }
}

/// Read a single text file into a Document, using the filename
/// as the source identifier.
fn load_single_text(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(Document::new(source, text))
}
