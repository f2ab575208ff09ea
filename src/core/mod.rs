//! Core analysis engine.
//!
//! Every tool runs over the same snapshot: module files (declarations),
//! locale tables, and the source tree (references). This module loads that
//! snapshot and provides the extraction and scanning primitives.
//!
//! ## Module Structure
//!
//! - `context`: [`ToolContext`], the loaded snapshot
//! - `data`: declarations, tables and source locations
//! - `file_scanner`: directory walking with noise/ignore filtering
//! - `parsers`: module-file extractor and table reader
//! - `registry`: global key → declaration map
//! - `usage`: reference grammar and usage scanner

pub mod context;
pub mod data;
pub mod file_scanner;
pub mod parsers;
pub mod registry;
pub mod usage;

pub use context::ToolContext;
pub use data::{
    Declaration, LineRange, LocaleTable, ModuleFile, SourceContext, SourceLocation, TableFile,
    TableSet, UnrecognizedLine, namespace_of,
};
pub use registry::KeyRegistry;
pub use usage::{
    KeyMatcher, Reference, ReferenceGrammar, ReferenceKey, ReferenceShape, SourceFile,
    UsageScanner, UsageSite,
};
