//! Global key registry built from every module file.
//!
//! Keys are only unique per file by construction of the module format; the
//! registry enforces global uniqueness and fails fast on the first collision.

use anyhow::{Result, bail};
use indexmap::IndexMap;

use crate::core::data::{Declaration, ModuleFile};

#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    /// Declarations keyed by key, in module scan order.
    declarations: IndexMap<String, Declaration>,
}

impl KeyRegistry {
    /// Build the registry from module files (expected sorted by path).
    pub fn build(modules: &[ModuleFile]) -> Result<Self> {
        let mut declarations: IndexMap<String, Declaration> = IndexMap::new();

        for decl in modules.iter().flat_map(|m| m.declarations.iter()) {
            if let Some(previous) = declarations.get(&decl.key) {
                bail!(
                    "Key '{}' is declared twice: {}:{} and {}:{}",
                    decl.key,
                    previous.file_path,
                    previous.lines.start(),
                    decl.file_path,
                    decl.lines.start()
                );
            }
            declarations.insert(decl.key.clone(), decl.clone());
        }

        Ok(Self { declarations })
    }

    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.declarations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.declarations.contains_key(key)
    }

    /// Declarations in module scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
