//! Command implementations for the `swc` CLI

pub mod bulk;
pub mod common;
pub mod resources;
