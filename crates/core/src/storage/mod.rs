//! Storage collaborators.
//!
//! This module provides the `StorageService` trait consumed by stage
//! services, a local filesystem implementation and a scripted mock.

pub mod base;
pub mod local;
pub mod mock;

pub use base::{StorageError, StorageResult, StorageService};
pub use local::LocalStorageService;
pub use mock::MockStorage;
