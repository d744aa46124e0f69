//! # pcs-core
//!
//! Stage services and their collaborators for private computation
//! pipelines.
//!
//! This crate provides:
//! - The `StageService` contract every pipeline stage implements
//! - The input data validation stage
//! - Storage collaborators consumed by stages
//! - A stage runner that sequences stages and publishes events
//! - Configuration loading from the `.pcs/` directory
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`storage`]: StorageService trait and implementations
//! - [`stages`]: StageService trait and stage implementations
//! - [`state`]: Instance status transitions
//! - [`engine`]: Stage runner

pub mod config;
pub mod engine;
pub mod stages;
pub mod state;
pub mod storage;
