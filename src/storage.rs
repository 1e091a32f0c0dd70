use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::store::ScheduleData;

/// TOML file persistence for `ScheduleData`
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

    /// Load the schedule, or an empty one if the file does not exist yet
    pub fn load(&self) -> Result<ScheduleData> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "no schedule file, starting empty");
            return Ok(ScheduleData::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let data: ScheduleData = toml::from_str(&content)?;
        Ok(data)
    }

    pub fn save(&self, data: &ScheduleData) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
