//! Test fixtures for creating sample instances.

use pcs_protocol::instance_models::{ComputationInstance, GameType, Role};
use pcs_protocol::status_models::{InstanceStatus, PipelineStage};

/// An instance in INPUT_DATA_VALIDATION_STARTED with input path "456".
pub fn validation_started_instance() -> ComputationInstance {
    ComputationInstance {
        instance_id: "123".to_string(),
        role: Role::Partner,
        game_type: GameType::Lift,
        status: InstanceStatus::started(PipelineStage::InputDataValidation),
        status_update_ts: 1600000000,
        input_path: "456".to_string(),
        output_dir: "789".to_string(),
        instances: vec![],
        num_pid_containers: 1,
        num_mpc_containers: 1,
        num_files_per_mpc_container: 1,
    }
}

/// A freshly created instance with a unique id.
#[allow(dead_code)]
pub fn created_instance(input_path: &str) -> ComputationInstance {
    pcs_core::state::instance::create_instance(
        uuid::Uuid::new_v4().to_string(),
        Role::Publisher,
        GameType::Attribution,
        input_path.to_string(),
        "out".to_string(),
    )
}

/// An instance carrying non-default values in every pass-through field.
#[allow(dead_code)]
pub fn instance_with_sub_instances() -> ComputationInstance {
    ComputationInstance {
        instances: vec![
            serde_json::json!({"instance_id": "pid-0", "status": "COMPLETED"}),
            serde_json::json!({"instance_id": "mpc-0", "containers": [1, 2, 3]}),
        ],
        num_pid_containers: 4,
        num_mpc_containers: 8,
        num_files_per_mpc_container: 16,
        ..validation_started_instance()
    }
}
