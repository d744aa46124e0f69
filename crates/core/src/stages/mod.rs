//! Stage services.
//!
//! This module provides the `StageService` trait that every pipeline stage
//! implements, and the input data validation stage.

pub mod base;
pub mod input_data_validation;

pub use base::{FailureReason, StageError, StageOutcome, StageResult, StageService, Verdict};
pub use input_data_validation::InputDataValidationStageService;
