//! CLI command implementations.

pub mod check;
pub mod init;
pub mod show;
pub mod update;
