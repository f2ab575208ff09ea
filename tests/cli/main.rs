use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Map, Value};
use tempfile::TempDir;

mod dedupe;
mod init;
mod prune;
mod sync;
mod untranslated;
mod verify;

const BIN_NAME: &str = "keyward";

pub const MODULES_DIR: &str = "src/i18n/modules";
pub const LOCALES_DIR: &str = "src/i18n/locales";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    /// An empty project. A `.git` directory stops config lookup at the
    /// project root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write `<modules>/<name>` declaring `entries` one per line.
    pub fn write_module(&self, name: &str, entries: &[(&str, &str)]) -> Result<()> {
        self.write_file(&format!("{}/{}", MODULES_DIR, name), &module(entries))
    }

    /// Write `<locales>/<locale>.json` with `entries` in order.
    pub fn write_table(&self, locale: &str, entries: &[(&str, &str)]) -> Result<()> {
        self.write_file(&table_path(locale), &table(entries))
    }

    pub fn read_table(&self, locale: &str) -> Result<String> {
        self.read_file(&table_path(locale))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn verify_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("verify");
        cmd
    }

    pub fn dedupe_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("dedupe");
        cmd
    }

    pub fn sync_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sync");
        cmd
    }

    pub fn prune_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("prune");
        cmd
    }

    pub fn untranslated_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("untranslated");
        cmd
    }

    pub fn init_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("init");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn table_path(locale: &str) -> String {
    format!("{}/{}.json", LOCALES_DIR, locale)
}

pub fn module(entries: &[(&str, &str)]) -> String {
    let mut content = String::from("export default {\n");
    for (key, value) in entries {
        content.push_str(&format!("  \"{}\": \"{}\",\n", key, value));
    }
    content.push_str("} as const;\n");
    content
}

/// Pretty-printed table exactly as keyward writes it.
pub fn table(entries: &[(&str, &str)]) -> String {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    let mut content = serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default();
    content.push('\n');
    content
}
