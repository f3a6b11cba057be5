// ============================================================
// Layer 6 - Model Configuration
// ============================================================
// Every model directory carries a model_config.json describing
// the settings the model was built with. The labelling commands
// read it so that prediction-time windowing matches what the
// data preparation used; the data in turn was converted with the
// same line limit.
//
// When no model directory is given (or no config exists yet) the
// commands fall back to Default, which mirrors the conversion
// defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::domain::label::Task;

pub const CONFIG_FILE: &str = "model_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which labelling task this model directory serves
    pub task: Task,

    /// Maximum tokens per example window
    pub line_limit: usize,

    /// The tag vocabulary, in index order
    pub labels: Vec<String>,

    /// Model version identifier, e.g. "2020.3.2"
    pub version: String,
}

impl ModelConfig {
    pub fn for_task(task: Task) -> Self {
        Self {
            task,
            line_limit: 250,
            labels:     task.labels(),
            version:    env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Save as pretty JSON into a model directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    /// Load from a model directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model config from '{}'. Has `fetch` been run for this model?",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from a model directory when one is given and a config
    /// exists there; otherwise the task default.
    pub fn load_or_default(dir: Option<&Path>, task: Task) -> Result<Self> {
        match dir {
            Some(dir) if dir.join(CONFIG_FILE).exists() => {
                let config = Self::load(dir)?;
                tracing::info!(
                    "Using model config from '{}' (version {})",
                    dir.display(),
                    config.version
                );
                Ok(config)
            }
            _ => Ok(Self::for_task(task)),
        }
    }
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig::for_task(Task::Splitting);
        config.save(dir.path()).unwrap();

        let back = ModelConfig::load(dir.path()).unwrap();
        assert_eq!(back.line_limit, 250);
        assert_eq!(back.labels, vec!["o", "b-r", "i-r"]);
        assert_eq!(back.task, Task::Splitting);
    }

    #[test]
    fn test_default_when_no_directory() {
        let config = ModelConfig::load_or_default(None, Task::Parsing).unwrap();
        assert!(config.labels.contains(&"author".to_string()));
    }

    #[test]
    fn test_default_when_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig::load_or_default(Some(dir.path()), Task::Splitting).unwrap();
        assert_eq!(config.line_limit, 250);
    }
}
