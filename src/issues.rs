//! Issue types for key-integrity analysis results.
//!
//! Each issue is self-contained with everything needed by:
//! - Reporter: to display the issue (cargo-style)
//! - Action: to fix the issue (delete declarations, write tables)

use enum_dispatch::enum_dispatch;

use crate::core::{Declaration, ReferenceShape, SourceContext, SourceLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    DynamicKey,
    UnrecognizedLine,
    TableDrift,
    UnusedKey,
    Untranslated,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::DynamicKey => write!(f, "dynamic-key"),
            Rule::UnrecognizedLine => write!(f, "unrecognized-line"),
            Rule::TableDrift => write!(f, "table-drift"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::Untranslated => write!(f, "untranslated"),
        }
    }
}

// ============================================================
// Issue Types - Source Code
// ============================================================

/// Literal key referenced in source code but declared by no module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: SourceContext,
    pub key: String,
    pub shape: ReferenceShape,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Reference whose key is computed at runtime (`t(name)`, `` t(`a.${b}`) ``).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicKeyIssue {
    pub context: SourceContext,
    pub shape: ReferenceShape,
}

impl DynamicKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DynamicKey
    }
}

// ============================================================
// Issue Types - Module Files
// ============================================================

/// Module line that is neither a declaration nor a structural marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedLineIssue {
    pub context: SourceContext,
}

impl UnrecognizedLineIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnrecognizedLine
    }
}

/// Declared key with no usage site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub context: SourceContext,
    pub declaration: Declaration,
}

impl UnusedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedKey
    }
}

// ============================================================
// Issue Types - Tables
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    /// Declared in a module, absent from the canonical table.
    NotInTable,
    /// In the canonical table, declared by no module.
    NotDeclared,
}

/// Disagreement between the declared key set and the canonical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDriftIssue {
    pub location: SourceLocation,
    pub key: String,
    pub kind: DriftKind,
    /// The canonical table the key was compared against.
    pub table_path: String,
}

impl TableDriftIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::TableDrift
    }
}

/// Key whose value is identical in every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub location: SourceLocation,
    pub key: String,
    /// The canonical value (shared by every table).
    pub value: String,
    pub canonical_locale: String,
    /// Locales where the value is identical to the canonical one.
    pub identical_in: Vec<String>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingKey(MissingKeyIssue),
    DynamicKey(DynamicKeyIssue),
    UnrecognizedLine(UnrecognizedLineIssue),
    TableDrift(TableDriftIssue),
    UnusedKey(UnusedKeyIssue),
    Untranslated(UntranslatedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingKey(_) => MissingKeyIssue::severity(),
            Issue::DynamicKey(_) => DynamicKeyIssue::severity(),
            Issue::UnrecognizedLine(_) => UnrecognizedLineIssue::severity(),
            Issue::TableDrift(_) => TableDriftIssue::severity(),
            Issue::UnusedKey(_) => UnusedKeyIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingKey(_) => MissingKeyIssue::rule(),
            Issue::DynamicKey(_) => DynamicKeyIssue::rule(),
            Issue::UnrecognizedLine(_) => UnrecognizedLineIssue::rule(),
            Issue::TableDrift(_) => TableDriftIssue::rule(),
            Issue::UnusedKey(_) => UnusedKeyIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source or module line (has the line text for the snippet).
    Source(&'a SourceContext),
    /// Table entry (position only).
    Table(&'a SourceLocation),
}

impl ReportLocation<'_> {
    pub fn location(&self) -> &SourceLocation {
        match self {
            ReportLocation::Source(ctx) => &ctx.location,
            ReportLocation::Table(loc) => loc,
        }
    }
}

/// Uniform view of every issue type for the reporter.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, line text, ...).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("referenced via {} but not declared in any module", self.shape))
    }
}

impl Report for DynamicKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("dynamic key in {}", self.shape)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("keys built at runtime are invisible to prune and dedupe".to_string())
    }
}

impl Report for UnrecognizedLineIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.context.source_line.trim().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("declare keys as `\"key\": \"value\",` or split key and value over two lines")
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.declaration.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.declaration.value))
    }
}

impl Report for TableDriftIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Table(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(match self.kind {
            DriftKind::NotInTable => format!("declared but missing from {}", self.table_path),
            DriftKind::NotDeclared => "in the canonical table but declared by no module".to_string(),
        })
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Table(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") identical in: {}",
            self.value,
            self.identical_in.join(", ")
        ))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a_loc, b_loc) = (self.location(), other.location());
        let (a, b) = (a_loc.location(), b_loc.location());

        a.file_path
            .cmp(&b.file_path)
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.col.cmp(&b.col))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
