use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Saved job settings, read from a JSON file.
///
/// ```json
/// { "steps": "zip,encrypt", "path": "output/my_document.processed" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Comma-separated step list; empty means passthrough
    pub steps: String,
    /// Where processed bytes are stored
    pub path: Option<PathBuf>,
}

impl JobConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config = Self::from_bytes(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(PipelineError::InvalidConfig("path must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Steps to use, preferring an explicit command-line value
    pub fn steps_or<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.unwrap_or(self.steps.as_str())
    }

    /// Storage path to use, preferring an explicit command-line value
    pub fn path_or(&self, cli: Option<&Path>) -> Option<PathBuf> {
        cli.map(Path::to_path_buf).or_else(|| self.path.clone())
    }
}
