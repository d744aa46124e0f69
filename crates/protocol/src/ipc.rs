//! Events emitted while instances move through the pipeline.
//!
//! The runner publishes these on a channel so that whoever persists or
//! displays instances can follow status changes without polling. Unlike the
//! instance itself, [`Event::StageFailed`] carries the reason a stage
//! failed, which keeps "input missing" and "storage check errored"
//! distinguishable for observers.

use serde::{Deserialize, Serialize};

use crate::status_models::{InstanceStatus, PipelineStage};

/// Events sent from the runner to observers.
///
/// Uses tagged enum serialization:
/// ```json
/// {
///   "type": "statusUpdate",
///   "payload": {
///     "instance_id": "123",
///     "status": "INPUT_DATA_VALIDATION_COMPLETED",
///     "status_update_ts": 1600000000
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A stage has been started on an instance.
    StageStarted {
        instance_id: String,
        stage: PipelineStage,
    },

    /// An instance's status has changed.
    StatusUpdate {
        instance_id: String,
        status: InstanceStatus,
        status_update_ts: i64,
    },

    /// A stage finished successfully.
    StageCompleted {
        instance_id: String,
        stage: PipelineStage,
    },

    /// A stage finished unsuccessfully.
    StageFailed {
        instance_id: String,
        stage: PipelineStage,
        reason: String,
    },
}
