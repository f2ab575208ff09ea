use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Removes keys from a flat JSON table file.
///
/// Uses serde_json with `preserve_order`, so surviving keys keep their
/// order. Output is always pretty-printed with 2-space indentation and a
/// trailing newline.
pub struct TableEditor {
    file_path: PathBuf,
    value: Value,
}

impl TableEditor {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse table file: {}", path.display()))?;
        if !value.is_object() {
            bail!("Table file is not a JSON object: {}", path.display());
        }
        Ok(Self {
            file_path: path.to_path_buf(),
            value,
        })
    }

    /// Remove `keys`, returning how many were present.
    pub fn remove_keys(&mut self, keys: &[String]) -> usize {
        let Value::Object(map) = &mut self.value else {
            return 0;
        };
        keys.iter()
            .filter(|key| map.shift_remove(key.as_str()).is_some())
            .count()
    }

    pub fn content(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.value)
            .with_context(|| format!("Failed to serialize table: {}", self.file_path.display()))?;
        content.push('\n');
        Ok(content)
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.file_path, self.content()?)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))
    }
}
