pub mod check;
mod command_result;
pub mod get;
pub mod helper;
pub mod init;

pub use command_result::*;
