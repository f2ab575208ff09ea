//! Core data types shared by the extraction, scanning and rewrite phases.
//!
//! ## Module Structure
//!
//! - `declaration`: `Declaration`, `LineRange` and module-file snapshots
//! - `source`: Source code location types (`SourceContext`, `SourceLocation`)
//! - `table`: Flat key → string tables (`LocaleTable`, `TableSet`)

pub mod declaration;
pub mod source;
pub mod table;

pub use declaration::{Declaration, LineRange, ModuleFile, UnrecognizedLine, namespace_of};
pub use source::{SourceContext, SourceLocation};
pub use table::{LocaleTable, TableFile, TableSet};
