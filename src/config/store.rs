use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::validate::Validate;

/// YAML-file-backed settings store. A missing file means defaults; content
/// that fails to parse or validate is reported, never papered over.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T>(&self) -> Result<T, String>
    where
        T: for<'de> Deserialize<'de> + Validate + Default,
    {
        if !self.path.exists() {
            return Ok(T::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {}", self.path.display(), e))?;
        let value: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {}", self.path.display(), e))?;
        value
            .validate()
            .map_err(|e| format!("config validation error: {}", e))?;
        Ok(value)
    }

    pub fn save<T>(&self, value: &T) -> Result<(), String>
    where
        T: Serialize + Validate,
    {
        value
            .validate()
            .map_err(|e| format!("config validation error: {}", e))?;
        let content = serde_yaml_ng::to_string(value)
            .map_err(|e| format!("failed to serialize config: {}", e))?;
        std::fs::write(&self.path, content)
            .map_err(|e| format!("failed to write {}: {}", self.path.display(), e))?;
        Ok(())
    }
}
