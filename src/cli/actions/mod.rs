//! Actions that modify files.
//!
//! ## Architecture
//!
//! ```text
//! Plan / Issue (what should change)
//!     ↓
//! Action (→ Operations, one per file and kind)
//!     ↓
//! Operation (snapshot check, then write)
//! ```
//!
//! ## Actions
//!
//! - [`MergeDuplicates`]: Collapse same-namespace duplicate groups (dedupe)
//! - [`DeleteDeclaration`]: Remove unused declarations (prune)
//! - [`SyncTables`]: Write reconciled locale tables (sync)

mod delete_declaration;
mod merge_duplicates;
mod operation;
mod sync_tables;
mod table_editor;
mod traits;

pub use delete_declaration::DeleteDeclaration;
pub use merge_duplicates::MergeDuplicates;
pub use operation::{Operation, OperationResult};
pub use sync_tables::SyncTables;
pub(crate) use traits::execute_operations;
pub use traits::{Action, ActionStats};
