//! # pcs-protocol
//!
//! Core protocol definitions and data models for private computation stages.
//!
//! This crate defines the shared data structures used for:
//! - Computation instance records exchanged with the orchestrator
//! - The per-stage lifecycle status state machine
//! - Events emitted while instances move through the pipeline
//!
//! ## Modules
//!
//! - [`instance_models`]: Computation instance, role and game type
//! - [`status_models`]: Pipeline stages and instance statuses
//! - [`ipc`]: Events published by the stage runner
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, serde_json and thiserror
//! - Wire compatibility: statuses serialize to the orchestrator's flat names
//! - Independent compilation: No dependencies on other pcs crates

pub mod instance_models;
pub mod ipc;
pub mod status_models;

// Re-export all public types for convenience
pub use instance_models::*;
pub use ipc::*;
pub use status_models::*;
