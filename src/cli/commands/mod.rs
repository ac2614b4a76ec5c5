mod command_result;
pub mod helper;
pub mod init;
pub mod scaffold;
pub mod show;
pub mod translate;
pub mod update;
pub mod validate;

pub use command_result::*;
