//! Computation instance models.
//!
//! A computation instance is one party's view of one private computation
//! run. It is created and persisted by the orchestrator and borrowed by
//! stage services, which only ever change its `status`.

use serde::{Deserialize, Serialize};

use crate::status_models::InstanceStatus;

/// Which party an instance represents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Publisher,
    Partner,
}

/// Which computation workload an instance runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    Lift,
    Attribution,
}

/// The unit of work flowing through the pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComputationInstance {
    /// Opaque identifier, unique per computation run.
    pub instance_id: String,

    pub role: Role,

    pub game_type: GameType,

    /// Current lifecycle status.
    pub status: InstanceStatus,

    /// Unix timestamp (seconds) of the last status change.
    ///
    /// Maintained by whoever persists the instance; stage services leave it
    /// alone.
    pub status_update_ts: i64,

    /// Location inspected by input data validation.
    pub input_path: String,

    /// Destination for later stages.
    pub output_dir: String,

    /// Nested per-stage or per-container instance records.
    ///
    /// Opaque here and carried through in order.
    #[serde(default)]
    pub instances: Vec<serde_json::Value>,

    pub num_pid_containers: u32,

    pub num_mpc_containers: u32,

    pub num_files_per_mpc_container: u32,
}
