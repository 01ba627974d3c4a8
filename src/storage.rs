use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::schedule::Records;

/// Read-only TOML record source
///
/// The file holds `[[reminders]]`, `[[events]]` and `[[todos]]` arrays. A missing
/// file is an empty record set.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<Records> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "data file not found, starting empty");
            return Ok(Records::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("failed to read {}", self.file_path.display()))?;
        let records: Records = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;

        info!(
            path = %self.file_path.display(),
            reminders = records.reminders.len(),
            events = records.events.len(),
            todos = records.todos.len(),
            "loaded records"
        );
        Ok(records)
    }
}
