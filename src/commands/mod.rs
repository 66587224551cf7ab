//! Command implementations behind the CLI

pub mod build;
pub mod escape;
pub mod list;
