//! Entry points for the CLI subcommands.

pub mod config;
mod update;

pub use config::{UpdateConfig, UpdateOptions};
pub use update::update;
