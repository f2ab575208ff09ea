use std::fmt;

use super::source::SourceLocation;

/// Namespace of a key: the segment before its first dot.
///
/// A key without a dot is its own namespace.
pub fn namespace_of(key: &str) -> &str {
    key.split_once('.').map_or(key, |(namespace, _)| namespace)
}

/// Inclusive, 1-based range of lines occupied by a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start >= 1 && end >= start, "invalid line range {start}-{end}");
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }

    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A single key/value definition found in a module file.
///
/// Snapshot taken at scan time; it becomes stale as soon as the owning file
/// changes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub key: String,
    /// Unescaped literal value.
    pub value: String,
    pub file_path: String,
    pub lines: LineRange,
}

impl Declaration {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        file_path: impl Into<String>,
        lines: LineRange,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            file_path: file_path.into(),
            lines,
        }
    }

    pub fn namespace(&self) -> &str {
        namespace_of(&self.key)
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.file_path, self.lines.start(), 1)
    }
}

/// A non-blank module line that is neither a declaration nor a structural marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedLine {
    pub line: usize,
    pub text: String,
}

/// Extraction result for one module file.
#[derive(Debug, Clone)]
pub struct ModuleFile {
    pub file_path: String,
    /// File content at scan time.
    pub content: String,
    /// Declarations in line order. Ranges never overlap.
    pub declarations: Vec<Declaration>,
    pub unrecognized: Vec<UnrecognizedLine>,
}

impl ModuleFile {
    /// Text of the 1-based `line` at scan time.
    pub fn line_text(&self, line: usize) -> &str {
        self.content.lines().nth(line - 1).unwrap_or("")
    }
}
