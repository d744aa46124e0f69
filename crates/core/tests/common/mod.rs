//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality across all integration tests:
//! - Test fixtures (sample instances)
//! - Custom assertions over emitted events
//! - Mock storage collaborators

pub mod assertions;
pub mod fixtures;
pub mod mock_storages;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_storages::*;
