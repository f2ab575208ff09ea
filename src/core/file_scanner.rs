use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::NOISE_DIRS;

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files, sorted by path.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Options for one directory walk.
pub struct ScanOptions<'a> {
    /// File extensions to keep (without the dot).
    pub extensions: &'a [String],
    /// Directories skipped entirely (prefix match on the walked path).
    pub excluded_dirs: &'a [PathBuf],
    /// Glob patterns matched against the full path.
    pub ignore_patterns: &'a [String],
    pub verbose: bool,
}

/// Recursively collect files under `base_dir`.
///
/// Noise directories (`node_modules`, `.git`, build output, ...) are never
/// descended into.
pub fn scan_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let mut files: Vec<String> = Vec::new();
    let mut skipped_count = 0;

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in options.ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => {
                if options.verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    let walker = WalkDir::new(base_dir).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let path = entry.path();
        if entry.file_type().is_dir() {
            let is_noise = entry
                .file_name()
                .to_str()
                .is_some_and(|name| NOISE_DIRS.contains(&name));
            let is_excluded = options
                .excluded_dirs
                .iter()
                .any(|excluded| path.starts_with(excluded));
            return !is_noise && !is_excluded;
        }
        true
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if options.verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && has_extension(path, options.extensions) {
            files.push(path_str.into());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
