pub mod archive;
pub mod build_info;
pub mod commands;
pub mod platform;
pub mod runtime;
pub mod update;
