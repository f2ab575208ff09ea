pub mod dedupe;
pub mod helper;
pub mod init;
pub mod prune;
pub mod sync;
pub mod untranslated;
pub mod verify;

mod command_result;

pub use command_result::*;
