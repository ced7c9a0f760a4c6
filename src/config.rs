//! Configuration module
//!
//! This module handles loading arc-init configuration from TOML files.

pub mod loader;
pub mod schema;

pub use schema::{Config, ShellConfig};
