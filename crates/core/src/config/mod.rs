//! Configuration loading and management.
//!
//! This module loads the optional `.pcs/config.toml` file that configures
//! the storage collaborator and logging.

pub mod error;
pub mod loader;
pub mod models;
