//! Keyward - localization-key integrity toolchain
//!
//! Keyward keeps three things consistent: module files that declare
//! translation keys, flat JSON locale tables, and the source code that
//! references keys through `t("…")`-style calls.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, actions, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Input loading, key registry and usage scanning
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Detection and planning rules over the loaded snapshot
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
