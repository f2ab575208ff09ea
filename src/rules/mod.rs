//! Rule implementations for keyward.
//!
//! Pure functions over the loaded snapshot. Each takes only the inputs it
//! needs (not a full context) and returns issues or plans.
//!
//! ## Module Structure
//!
//! - `duplicates`: value groups, cross-locale consistency, prefix partitioning
//! - `merge`: merge plans with usage sites for same-namespace groups
//! - `sync`: locale tables reconciled against the canonical table
//! - `unused`: declared keys without usage sites
//! - `untranslated`: values identical across all tables
//! - `missing`: referenced keys no module declares
//! - `dynamic`: reference sites with non-literal keys
//! - `unrecognized`: module lines the extractor could not account for
//! - `drift`: declared keys vs. canonical table keys

pub mod drift;
pub mod duplicates;
pub mod dynamic;
pub mod merge;
pub mod missing;
pub mod sync;
pub mod unrecognized;
pub mod untranslated;
pub mod unused;
