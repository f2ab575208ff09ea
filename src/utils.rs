//! Common utility functions shared across the codebase.

use heck::ToLowerCamelCase;

/// Number of leading words of a value used to build a suggested key name.
const SUGGESTED_KEY_WORDS: usize = 4;

/// Byte offsets where each line starts, for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// 1-based (line, column) for `offset`. Columns count chars, not bytes.
    pub fn position(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let line_start = self.offsets[line - 1];
        let col = content[line_start..offset].chars().count() + 1;
        (line, col)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let start = self.offsets[line - 1];
        let end = self.offsets.get(line).copied().unwrap_or(content.len());
        content[start..end].trim_end_matches(['\n', '\r'])
    }
}

/// Builds a shared-namespace key name from a translation value.
///
/// The first few words of the value are lower-camel-cased under `namespace`.
///
/// # Examples
///
/// ```
/// use keyward::utils::suggest_key_name;
///
/// assert_eq!(suggest_key_name("common", "Hello"), "common.hello");
/// assert_eq!(
///     suggest_key_name("common", "Save your changes before leaving?"),
///     "common.saveYourChangesBefore"
/// );
/// assert_eq!(suggest_key_name("common", "..."), "common.value");
/// ```
pub fn suggest_key_name(namespace: &str, value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().take(SUGGESTED_KEY_WORDS).collect();

    let name = words.join(" ").to_lower_camel_case();
    if name.is_empty() {
        format!("{}.value", namespace)
    } else {
        format!("{}.{}", namespace, name)
    }
}
