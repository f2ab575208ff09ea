//! Declaration Extractor for module files.
//!
//! Module files declare keys with a conservative, line-oriented grammar:
//!
//! ```text
//! "wallet.title": "Wallet",          // single-line shape
//! "wallet.description":              // two-line shape: key alone...
//!   "Manage your funds",             // ...then the value alone
//! ```
//!
//! Every other non-blank line must be a structural marker (object openers
//! and closers, imports, comments). Lines that are neither are recorded as
//! unrecognized so that drift in the file format is visible instead of
//! silently under-extracted. Nested objects are skipped whole: their inner
//! lines are unrecognized, never mistaken for top-level declarations.

use std::{fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::core::data::{Declaration, LineRange, ModuleFile, UnrecognizedLine};

/// A double-quoted string body: any char except quote/backslash, or an escape.
const QUOTED: &str = r#""((?:[^"\\]|\\.)*)""#;

static SINGLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"^\s*{QUOTED}\s*:\s*{QUOTED}\s*,?\s*$"#)).unwrap());

static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"^\s*{QUOTED}\s*:\s*$"#)).unwrap());

static VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"^\s*{QUOTED}\s*,?\s*$"#)).unwrap());

/// A key whose value opens a nested object or array on the same line.
static NESTED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"^\s*{QUOTED}\s*:\s*[\[{{]"#)).unwrap());

static STRUCTURAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)^\s*(?:
            [\[\](){};,]+                                   # bare brackets and separators
          | \}\s*(?:as\s+const|satisfies\s+[^;]+)\s*;?      # } as const; / } satisfies T;
          | import\b.*
          | (?:export|const|let|var|module\.exports)\b[^"'`]*[\[{;\w]   # openers, no literals
          | //.* | /\*.* | \*.*                             # comments
        )\s*$"#,
    )
    .unwrap()
});

/// Unescape a JSON-style string body exactly as the table loader would.
///
/// Returns `None` for escapes JSON rejects (e.g. `\'`).
pub fn unescape(raw: &str) -> Option<String> {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).ok()
}

pub fn read_module_file(path: &Path) -> Result<ModuleFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read module file: {}", path.display()))?;
    let file_path = path.to_string_lossy().to_string();
    extract_declarations(&file_path, content)
}

/// Extract every recognizable declaration from a module file's text.
///
/// Fails only if the produced line ranges overlap, which would make
/// line-based deletion unsafe.
pub fn extract_declarations(file_path: &str, content: String) -> Result<ModuleFile> {
    let lines: Vec<&str> = content.lines().collect();
    let mut declarations = Vec::new();
    let mut unrecognized = Vec::new();

    let mut nested_depth: i32 = 0;
    let mut i = 0;
    while i < lines.len() {
        let line_no = i + 1;
        let line = lines[i];

        if nested_depth > 0 {
            nested_depth += bracket_delta(line);
            if !line.trim().is_empty() {
                unrecognized.push(UnrecognizedLine {
                    line: line_no,
                    text: line.to_string(),
                });
            }
            i += 1;
            continue;
        }

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some(caps) = SINGLE_LINE.captures(line)
            && let (Some(key), Some(value)) = (unescape(&caps[1]), unescape(&caps[2]))
        {
            declarations.push(Declaration::new(
                key,
                value,
                file_path,
                LineRange::single(line_no),
            ));
            i += 1;
            continue;
        }

        if let Some(caps) = KEY_LINE.captures(line)
            && let Some(next) = lines.get(i + 1)
            && let Some(value_caps) = VALUE_LINE.captures(next)
            && let (Some(key), Some(value)) = (unescape(&caps[1]), unescape(&value_caps[1]))
        {
            declarations.push(Declaration::new(
                key,
                value,
                file_path,
                LineRange::new(line_no, line_no + 1),
            ));
            i += 2;
            continue;
        }

        if NESTED_OPEN.is_match(line) {
            nested_depth = bracket_delta(line).max(0);
        } else if STRUCTURAL.is_match(line) {
            i += 1;
            continue;
        }

        unrecognized.push(UnrecognizedLine {
            line: line_no,
            text: line.to_string(),
        });
        i += 1;
    }

    check_non_overlapping(file_path, &declarations)?;

    Ok(ModuleFile {
        file_path: file_path.to_string(),
        content,
        declarations,
        unrecognized,
    })
}

/// Net count of opening minus closing brackets outside string literals.
fn bracket_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' | '[' => delta += 1,
            '}' | ']' => delta -= 1,
            _ => {}
        }
    }
    delta
}

fn check_non_overlapping(file_path: &str, declarations: &[Declaration]) -> Result<()> {
    for pair in declarations.windows(2) {
        if pair[0].lines.overlaps(&pair[1].lines) || pair[0].lines.start() > pair[1].lines.start() {
            bail!(
                "Overlapping declarations in {}: '{}' (lines {}) and '{}' (lines {})",
                file_path,
                pair[0].key,
                pair[0].lines,
                pair[1].key,
                pair[1].lines
            );
        }
    }
    Ok(())
}
