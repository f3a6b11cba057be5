// ============================================================
// Layer 6 - Artefact Store
// ============================================================
// Manages the files a trained labelling model needs at runtime:
// weights plus the token / character / label index maps built
// during training. Artefacts live in a per-model directory and
// are fetched from a remote base URL on demand.
//
// The store is idempotent: an artefact already on disk is never
// downloaded again, so `fetch` can run before every labelling
// job without wasted transfers.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf, time::Duration};

/// The artefact files a model directory is expected to contain
pub const DEFAULT_ARTEFACTS: [&str; 6] = [
    "weights.bin",
    "word2ind.json",
    "ind2label.json",
    "char2ind.json",
    "maxes.json",
    "model_config.json",
];

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct ArtefactStore {
    /// Local model directory
    dir: PathBuf,

    /// Remote directory the artefacts are published under,
    /// e.g. "https://example.org/models/2020.3.2_parsing/"
    base_url: String,
}

impl ArtefactStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Joining below assumes a trailing slash
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { dir: dir.into(), base_url }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Ensure a single artefact exists locally, downloading it if
    /// missing. Returns true when a download happened.
    pub fn ensure(&self, artefact: &str) -> Result<bool> {
        let path = self.dir.join(artefact);

        if path.exists() {
            tracing::debug!("'{}' exists, nothing to be done", path.display());
            return Ok(false);
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let url = format!("{}{}", self.base_url, artefact);
        tracing::info!("Downloading '{}' from {}", artefact, url);

        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        let bytes = client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Download failed for '{url}'"))?
            .bytes()?;

        fs::write(&path, &bytes)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved {} bytes to '{}'", bytes.len(), path.display());
        Ok(true)
    }

    /// Ensure every artefact in the list exists locally. Returns
    /// the number of files actually downloaded.
    pub fn ensure_all(&self, artefacts: &[&str]) -> Result<usize> {
        let mut downloaded = 0;
        for artefact in artefacts {
            if self.ensure(artefact)? {
                downloaded += 1;
            }
        }
        tracing::debug!(
            "{} of {} artefacts downloaded into '{}'",
            downloaded,
            artefacts.len(),
            self.dir.display()
        );
        Ok(downloaded)
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_artefact_not_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("weights.bin"), b"w").unwrap();

        // The URL is unreachable on purpose: an existing file must
        // short-circuit before any network access
        let store = ArtefactStore::new(dir.path(), "http://127.0.0.1:1/none");
        assert!(!store.ensure("weights.bin").unwrap());
    }

    #[test]
    fn test_missing_artefact_fails_without_server() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtefactStore::new(dir.path(), "http://127.0.0.1:1/none");
        assert!(store.ensure("weights.bin").is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let store = ArtefactStore::new("/tmp/m", "http://example.org/models");
        assert_eq!(store.base_url, "http://example.org/models/");
    }
}
