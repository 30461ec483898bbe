//! Subcommand implementations.

pub mod apply;
pub mod clear;
pub mod info;
