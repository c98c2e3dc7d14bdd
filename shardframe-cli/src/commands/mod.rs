//! Subcommand implementations

pub mod get;
pub mod inspect;
pub mod pack;
