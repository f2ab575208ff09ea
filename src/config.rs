use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keywardrc.json";

/// Directory names never descended into when walking the source tree.
pub const NOISE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    "target",
];

/// Policy for picking the key that survives a same-namespace merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalKeyPolicy {
    /// Lexicographically smallest member key.
    #[default]
    Smallest,
    /// Member declared first in module scan order.
    FirstDeclared,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_modules_root")]
    pub modules_root: String,
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_canonical_locale")]
    pub canonical_locale: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,
    #[serde(default = "default_translation_objects")]
    pub translation_objects: Vec<String>,
    #[serde(default = "default_key_attributes")]
    pub key_attributes: Vec<String>,
    #[serde(default)]
    pub canonical_key_policy: CanonicalKeyPolicy,
    #[serde(default = "default_untranslated_report")]
    pub untranslated_report: String,
}

fn default_modules_root() -> String {
    "./src/i18n/modules".to_string()
}

fn default_locales_root() -> String {
    "./src/i18n/locales".to_string()
}

fn default_canonical_locale() -> String {
    "en".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_source_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte"]
        .map(String::from)
        .to_vec()
}

fn default_translation_functions() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_translation_objects() -> Vec<String> {
    vec!["i18n".to_string()]
}

fn default_key_attributes() -> Vec<String> {
    vec!["i18nKey".to_string()]
}

fn default_untranslated_report() -> String {
    "untranslated.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modules_root: default_modules_root(),
            locales_root: default_locales_root(),
            canonical_locale: default_canonical_locale(),
            source_root: default_source_root(),
            source_extensions: default_source_extensions(),
            ignores: Vec::new(),
            translation_functions: default_translation_functions(),
            translation_objects: default_translation_objects(),
            key_attributes: default_key_attributes(),
            canonical_key_policy: CanonicalKeyPolicy::default(),
            untranslated_report: default_untranslated_report(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, or if a
    /// list the scanner depends on is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.source_extensions.is_empty() {
            bail!("'sourceExtensions' must list at least one extension");
        }

        if self.translation_functions.is_empty() && self.key_attributes.is_empty() {
            bail!("At least one of 'translationFunctions' or 'keyAttributes' must be set");
        }

        if self.canonical_locale.trim().is_empty() {
            bail!("'canonicalLocale' must not be empty");
        }

        if !self.untranslated_report.ends_with(".json") {
            bail!(
                "'untranslatedReport' must be a .json file name, got \"{}\"",
                self.untranslated_report
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
