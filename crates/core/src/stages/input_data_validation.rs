//! Input data validation stage.
//!
//! Confirms that the instance's input data is present in storage before
//! ID matching may run.

use crate::stages::base::{StageResult, StageService, Verdict};
use crate::storage::StorageService;
use async_trait::async_trait;
use pcs_protocol::instance_models::ComputationInstance;
use pcs_protocol::status_models::PipelineStage;
use std::sync::Arc;

/// Checks that `input_path` exists, with one call to the injected storage.
pub struct InputDataValidationStageService {
    storage: Arc<dyn StorageService>,
}

impl InputDataValidationStageService {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl StageService for InputDataValidationStageService {
    fn stage(&self) -> PipelineStage {
        PipelineStage::InputDataValidation
    }

    async fn execute(&self, instance: &ComputationInstance) -> StageResult<Verdict> {
        tracing::debug!(
            instance_id = %instance.instance_id,
            path = %instance.input_path,
            "checking input data"
        );

        if self.storage.file_exists(&instance.input_path).await? {
            Ok(Verdict::Held)
        } else {
            Ok(Verdict::NotHeld(format!(
                "input file {} not found",
                instance.input_path
            )))
        }
    }
}
