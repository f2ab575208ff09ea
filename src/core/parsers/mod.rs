//! File parsers for module files and locale tables.
//!
//! This module provides parsers for the two inputs with a fixed format:
//! - `module`: line-oriented declaration extractor for module files
//! - `table`: flat key → string JSON table reader

pub mod module;
pub mod table;
