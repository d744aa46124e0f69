//! Base StageService trait and supporting types.
//!
//! A stage service owns exactly one [`PipelineStage`]. Its stage-specific
//! work lives in [`StageService::execute`], which may fail. The provided
//! [`StageService::run`] is the one place where that result is folded into
//! the stage's terminal status, so no error ever reaches the caller.

use crate::storage::StorageError;
use async_trait::async_trait;
use pcs_protocol::instance_models::ComputationInstance;
use pcs_protocol::status_models::{InstanceStatus, PipelineStage};
use std::fmt;
use thiserror::Error;

/// Whether a stage's precondition held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Held,
    /// The precondition legitimately does not hold, with a description.
    NotHeld(String),
}

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Storage check failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Execution failed: {0}")]
    ExecutionError(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Why a stage ended in its `FAILED` status.
///
/// Both reasons produce the same status on the instance; the distinction
/// only exists for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    PreconditionNotMet(String),
    CollaboratorError(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::PreconditionNotMet(msg) => write!(f, "precondition not met: {msg}"),
            FailureReason::CollaboratorError(msg) => write!(f, "check failed: {msg}"),
        }
    }
}

/// Result of one `run` of a stage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Failed(FailureReason),
}

impl StageOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed)
    }

    /// The terminal status of `stage` that this outcome maps to.
    pub fn status_for(&self, stage: PipelineStage) -> InstanceStatus {
        match self {
            StageOutcome::Completed => InstanceStatus::completed(stage),
            StageOutcome::Failed(_) => InstanceStatus::failed(stage),
        }
    }

    /// Fold the result of a stage's work into an outcome.
    pub fn from_result(result: StageResult<Verdict>) -> Self {
        match result {
            Ok(Verdict::Held) => StageOutcome::Completed,
            Ok(Verdict::NotHeld(msg)) => {
                StageOutcome::Failed(FailureReason::PreconditionNotMet(msg))
            }
            Err(e) => StageOutcome::Failed(FailureReason::CollaboratorError(e.to_string())),
        }
    }
}

#[async_trait]
pub trait StageService: Send + Sync {
    /// The stage whose status triple this service reads and writes.
    fn stage(&self) -> PipelineStage;

    /// Stage-specific work. Does not touch the instance.
    async fn execute(&self, instance: &ComputationInstance) -> StageResult<Verdict>;

    /// Run the stage and move `instance` to the stage's terminal status.
    ///
    /// The caller is expected to have set the stage's `STARTED` status.
    /// Only `status` is written.
    async fn run(&self, instance: &mut ComputationInstance) -> StageOutcome {
        let stage = self.stage();
        let outcome = StageOutcome::from_result(self.execute(instance).await);

        match &outcome {
            StageOutcome::Completed => {
                tracing::info!(instance_id = %instance.instance_id, %stage, "stage completed");
            }
            StageOutcome::Failed(reason @ FailureReason::PreconditionNotMet(_)) => {
                tracing::warn!(instance_id = %instance.instance_id, %stage, %reason, "stage failed");
            }
            StageOutcome::Failed(reason @ FailureReason::CollaboratorError(_)) => {
                tracing::error!(instance_id = %instance.instance_id, %stage, %reason, "stage failed");
            }
        }

        instance.status = outcome.status_for(stage);
        outcome
    }
}
