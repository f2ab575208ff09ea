//! Usage Scanner: literal key references in source files.
//!
//! A reference is one of a small, enumerable list of shapes
//! ([`ReferenceShape`]), each followed by a string literal holding the key:
//!
//! ```text
//! t("wallet.title")            Call
//! i18n.t("wallet.title")       NamespacedCall
//! i18nKey="wallet.title"       Attribute (also i18nKey={"wallet.title"})
//! ```
//!
//! Only plain literals count. `t(key)`, `` t(`a.${b}`) `` and `t("a." + b)`
//! are dynamic: invisible to per-key lookups and rewrites, and reported as
//! such by [`UsageScanner::references`].

use std::fmt;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use regex::{Captures, Regex};

use crate::{
    config::Config,
    core::data::{SourceContext, SourceLocation},
    utils::LineIndex,
};

/// One recognized way of referencing a key from source code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceShape {
    /// `t("key")`
    Call { function: String },
    /// `i18n.t("key")`
    NamespacedCall { object: String, function: String },
    /// `i18nKey="key"` or `i18nKey={"key"}`
    Attribute { name: String },
}

impl ReferenceShape {
    /// Regex for everything preceding the key literal, starting at the
    /// shape's first name.
    fn prefix_pattern(&self) -> String {
        match self {
            ReferenceShape::Call { function } => {
                format!(r"{}\(\s*", regex::escape(function))
            }
            ReferenceShape::NamespacedCall { object, function } => format!(
                r"{}\s*\.\s*{}\(\s*",
                regex::escape(object),
                regex::escape(function)
            ),
            ReferenceShape::Attribute { name } => {
                format!(r"{}\s*=\s*\{{?\s*", regex::escape(name))
            }
        }
    }

    fn leading_name(&self) -> &str {
        match self {
            ReferenceShape::Call { function } => function,
            ReferenceShape::NamespacedCall { object, .. } => object,
            ReferenceShape::Attribute { name } => name,
        }
    }

    /// Keeps the shape from matching the tail of a longer name. A name
    /// like `$t` has no word boundary before it, so its guard consumes the
    /// preceding character.
    fn start_guard(&self) -> &'static str {
        match self.leading_name().chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => r"(?:^|[^\w$])",
        }
    }
}

impl fmt::Display for ReferenceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceShape::Call { function } => write!(f, "{}(…)", function),
            ReferenceShape::NamespacedCall { object, function } => {
                write!(f, "{}.{}(…)", object, function)
            }
            ReferenceShape::Attribute { name } => write!(f, "{}=…", name),
        }
    }
}

/// The compiled set of reference shapes.
#[derive(Debug, Clone)]
pub struct ReferenceGrammar {
    shapes: Vec<ReferenceShape>,
    /// Matches any shape prefix; group `s{i}` identifies the shape.
    prefixes: Regex,
}

impl ReferenceGrammar {
    pub fn new(shapes: Vec<ReferenceShape>) -> Result<Self> {
        if shapes.is_empty() {
            bail!("No reference shapes configured");
        }
        let prefixes = Regex::new(&alternation(&shapes))
            .context("Failed to compile reference shape patterns")?;
        Ok(Self { shapes, prefixes })
    }

    /// Shapes from config: every function as a call, every
    /// object × function pair as a namespaced call, every attribute.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut shapes: Vec<ReferenceShape> = Vec::new();
        for object in &config.translation_objects {
            for function in &config.translation_functions {
                shapes.push(ReferenceShape::NamespacedCall {
                    object: object.clone(),
                    function: function.clone(),
                });
            }
        }
        for function in &config.translation_functions {
            shapes.push(ReferenceShape::Call {
                function: function.clone(),
            });
        }
        for name in &config.key_attributes {
            shapes.push(ReferenceShape::Attribute { name: name.clone() });
        }
        Self::new(shapes)
    }

    /// Build a matcher for one literal key. Regex metacharacters in the key
    /// (dots included) are escaped.
    pub fn key_matcher(&self, key: &str) -> Result<KeyMatcher<'_>> {
        let pattern = format!(
            r#"(?P<pre>{})(?P<open>["'`]){}(?P<close>["'`])"#,
            alternation(&self.shapes),
            regex::escape(key)
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Failed to build reference pattern for key '{}'", key))?;
        Ok(KeyMatcher {
            grammar: self,
            key: key.to_string(),
            regex,
        })
    }

    /// The matched shape and the offset where it starts (after any guard).
    fn shape_at(&self, caps: &Captures<'_>) -> Option<(usize, &ReferenceShape)> {
        self.shapes.iter().enumerate().find_map(|(i, shape)| {
            caps.name(&format!("s{}", i)).map(|m| (m.start(), shape))
        })
    }

    /// Every reference site in `file`, literal or dynamic.
    pub fn scan_file(&self, file: &SourceFile) -> Vec<Reference> {
        let content = file.content.as_str();
        let mut references = Vec::new();

        for caps in self.prefixes.captures_iter(content) {
            let (Some(m), Some((start, shape))) = (caps.get(0), self.shape_at(&caps)) else {
                continue;
            };
            let key = match parse_argument(&content[m.end()..]) {
                Argument::Literal(key) => ReferenceKey::Literal(key),
                Argument::Dynamic => ReferenceKey::Dynamic,
                Argument::NotAReference => continue,
            };
            references.push(Reference {
                key,
                site: file.site(start, shape.clone()),
            });
        }
        references
    }
}

fn alternation(shapes: &[ReferenceShape]) -> String {
    let alternatives: Vec<String> = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            format!(
                "{}(?P<s{}>{})",
                shape.start_guard(),
                i,
                shape.prefix_pattern()
            )
        })
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// A literal counts only with paired quotes and no concatenation after it.
fn is_plain_literal(content: &str, caps: &Captures<'_>) -> bool {
    let (Some(open), Some(close), Some(whole)) = (caps.name("open"), caps.name("close"), caps.get(0))
    else {
        return false;
    };
    open.as_str() == close.as_str() && !content[whole.end()..].trim_start().starts_with('+')
}

enum Argument {
    Literal(String),
    Dynamic,
    NotAReference,
}

/// Classify the text right after a shape prefix.
fn parse_argument(rest: &str) -> Argument {
    let mut chars = rest.char_indices();
    let quote = match chars.next() {
        Some((_, c @ ('"' | '\'' | '`'))) => c,
        Some((_, ')' | '=')) | None => return Argument::NotAReference,
        Some(_) => return Argument::Dynamic,
    };

    let mut value = String::new();
    let mut escaped = false;
    for (idx, c) in chars {
        if escaped {
            value.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                value.push(c);
                escaped = true;
            }
            '\n' if quote != '`' => return Argument::Dynamic,
            c if c == quote => {
                let interpolated = quote == '`' && value.contains("${");
                let concatenated = rest[idx + c.len_utf8()..].trim_start().starts_with('+');
                return if interpolated || concatenated || value.is_empty() {
                    Argument::Dynamic
                } else {
                    Argument::Literal(value)
                };
            }
            _ => value.push(c),
        }
    }
    Argument::Dynamic
}

/// A source file held in memory for the duration of a run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_path: String,
    pub content: String,
    line_index: LineIndex,
}

impl SourceFile {
    pub fn new(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_index = LineIndex::new(&content);
        Self {
            file_path: file_path.into(),
            content,
            line_index,
        }
    }

    fn site(&self, offset: usize, shape: ReferenceShape) -> UsageSite {
        let (line, col) = self.line_index.position(&self.content, offset);
        UsageSite {
            context: SourceContext::new(
                SourceLocation::new(&self.file_path, line, col),
                self.line_index.line_text(&self.content, line),
            ),
            shape,
        }
    }
}

/// A location where a key is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSite {
    pub context: SourceContext,
    pub shape: ReferenceShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKey {
    Literal(String),
    Dynamic,
}

/// A reference site found by scanning with the shape prefixes alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub key: ReferenceKey,
    pub site: UsageSite,
}

/// Compiled matcher for the literal references of one key.
pub struct KeyMatcher<'g> {
    grammar: &'g ReferenceGrammar,
    key: String,
    regex: Regex,
}

impl KeyMatcher<'_> {
    pub fn find_in(&self, file: &SourceFile) -> Vec<UsageSite> {
        if !file.content.contains(&self.key) {
            return Vec::new();
        }
        let content = file.content.as_str();
        self.regex
            .captures_iter(content)
            .filter(|caps| is_plain_literal(content, caps))
            .filter_map(|caps| {
                let (start, shape) = self.grammar.shape_at(&caps)?;
                Some(file.site(start, shape.clone()))
            })
            .collect()
    }

    pub fn is_found_in(&self, file: &SourceFile) -> bool {
        file.content.contains(&self.key)
            && self
                .regex
                .captures_iter(&file.content)
                .any(|caps| is_plain_literal(&file.content, &caps))
    }

    /// Replace the key token of every plain-literal reference with
    /// `replacement`, leaving the surrounding text untouched.
    ///
    /// Returns the new content and the number of references rewritten.
    pub fn rewrite(&self, content: &str, replacement: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.regex.replace_all(content, |caps: &Captures<'_>| {
            if is_plain_literal(content, caps) {
                count += 1;
                format!(
                    "{}{}{}{}",
                    &caps["pre"], &caps["open"], replacement, &caps["close"]
                )
            } else {
                caps[0].to_string()
            }
        });
        (rewritten.into_owned(), count)
    }
}

/// Read-only view over the in-memory source snapshot.
pub struct UsageScanner<'a> {
    grammar: &'a ReferenceGrammar,
    sources: &'a [SourceFile],
}

impl<'a> UsageScanner<'a> {
    pub fn new(grammar: &'a ReferenceGrammar, sources: &'a [SourceFile]) -> Self {
        Self { grammar, sources }
    }

    pub fn grammar(&self) -> &'a ReferenceGrammar {
        self.grammar
    }

    /// Every literal reference to `key`, in file then position order.
    pub fn find(&self, key: &str) -> Result<Vec<UsageSite>> {
        let matcher = self.grammar.key_matcher(key)?;
        Ok(self
            .sources
            .par_iter()
            .flat_map_iter(|file| matcher.find_in(file))
            .collect())
    }

    pub fn is_referenced(&self, key: &str) -> Result<bool> {
        let matcher = self.grammar.key_matcher(key)?;
        Ok(self.sources.par_iter().any(|file| matcher.is_found_in(file)))
    }

    /// Every reference site in the tree, literal or dynamic.
    pub fn references(&self) -> Vec<Reference> {
        self.sources
            .par_iter()
            .flat_map_iter(|file| self.grammar.scan_file(file))
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.sources.len()
    }
}
