use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        data::{ModuleFile, TableSet},
        file_scanner::{ScanOptions, scan_files},
        parsers::{module::read_module_file, table::load_tables},
        registry::KeyRegistry,
        usage::{ReferenceGrammar, SourceFile, UsageScanner},
    },
};

/// Snapshot of the three inputs every tool works on.
///
/// Module files and tables are loaded eagerly so malformed input fails the
/// run before any analysis. Source files are only listed up front; their
/// content is read on first use, since `sync` and `untranslated` never
/// need it.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--canonical-locale en`)
/// 2. `.keywardrc.json`
/// 3. Built-in defaults
pub struct ToolContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root (for resolving relative paths).
    pub root_dir: PathBuf,

    pub modules_dir: PathBuf,
    pub locales_dir: PathBuf,

    /// Extracted module files, sorted by path.
    pub modules: Vec<ModuleFile>,

    pub registry: KeyRegistry,
    pub tables: TableSet,

    /// Source files to scan for references, sorted by path.
    pub source_paths: Vec<String>,

    pub grammar: ReferenceGrammar,

    pub verbose: bool,

    sources: OnceCell<Vec<SourceFile>>,
}

impl ToolContext {
    /// Build the context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the config file is invalid
    /// - the modules or locales directory is missing
    /// - any module file or table cannot be read or parsed
    /// - a key is declared twice
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .keywardrc.json found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(ref canonical_locale) = common_args.canonical_locale {
            config.canonical_locale = canonical_locale.clone();
        }
        if let Some(ref locales_root) = common_args.locales_root {
            config.locales_root = locales_root.to_string_lossy().to_string();
        }
        if let Some(ref modules_root) = common_args.modules_root {
            config.modules_root = modules_root.to_string_lossy().to_string();
        }
        config.validate()?;

        let modules_dir = resolve_dir(&root_dir, &config.modules_root);
        let locales_dir = resolve_dir(&root_dir, &config.locales_root);
        let source_dir = resolve_dir(&root_dir, &config.source_root);

        if !modules_dir.is_dir() {
            bail!(
                "Modules directory '{}' does not exist.\n\
                 Hint: Check the 'modulesRoot' setting in .keywardrc.json.",
                modules_dir.display()
            );
        }

        let (modules, tables) = rayon::join(
            || load_modules(&modules_dir, &config, verbose),
            || load_tables(&locales_dir, &config.canonical_locale, &config.untranslated_report),
        );
        let modules = modules?;
        let tables = tables?;

        let registry = KeyRegistry::build(&modules)?;
        let grammar = ReferenceGrammar::from_config(&config)?;

        let excluded_dirs = vec![modules_dir.clone(), locales_dir.clone()];
        let scan_result = scan_files(
            &source_dir,
            &ScanOptions {
                extensions: &config.source_extensions,
                excluded_dirs: &excluded_dirs,
                ignore_patterns: &config.ignores,
                verbose,
            },
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        if verbose {
            eprintln!(
                "Note: {} module file(s), {} key(s), {} table(s), {} source file(s)",
                modules.len(),
                registry.len(),
                tables.file_count(),
                scan_result.files.len()
            );
        }

        Ok(Self {
            config,
            root_dir,
            modules_dir,
            locales_dir,
            modules,
            registry,
            tables,
            source_paths: scan_result.files,
            grammar,
            verbose,
            sources: OnceCell::new(),
        })
    }

    /// Source file contents (lazy, read in parallel).
    ///
    /// A file that cannot be read fails the run: treating it as empty could
    /// make a used key look unused.
    pub fn sources(&self) -> Result<&[SourceFile]> {
        if let Some(sources) = self.sources.get() {
            return Ok(sources);
        }

        let loaded = self
            .source_paths
            .par_iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read source file: {}", path))
                    .map(|content| SourceFile::new(path.as_str(), content))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.sources.get_or_init(|| loaded))
    }

    pub fn usage_scanner(&self) -> Result<UsageScanner<'_>> {
        Ok(UsageScanner::new(&self.grammar, self.sources()?))
    }

    pub fn unrecognized_line_count(&self) -> usize {
        self.modules.iter().map(|m| m.unrecognized.len()).sum()
    }
}

/// Resolve a configured directory against the project root.
///
/// Relative results always start from `root_dir` so that walked paths and
/// excluded directories compare component by component.
fn resolve_dir(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
    root_dir.join(rel)
}

fn load_modules(modules_dir: &Path, config: &Config, verbose: bool) -> Result<Vec<ModuleFile>> {
    let scan_result = scan_files(
        modules_dir,
        &ScanOptions {
            extensions: &config.source_extensions,
            excluded_dirs: &[],
            ignore_patterns: &[],
            verbose,
        },
    );

    scan_result
        .files
        .par_iter()
        .map(|path| read_module_file(Path::new(path)))
        .collect()
}
