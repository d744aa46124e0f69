//! Stage execution engine.
//!
//! The StageRunner drives one stage of a computation instance at a time:
//! it checks the stage may start, marks it Started, awaits the registered
//! stage service and records the terminal status the service produced.

use crate::stages::base::{StageOutcome, StageService};
use crate::state::instance::{can_start, finish_stage, next_stage, start_stage};
use anyhow::{anyhow, bail, Result};
use pcs_protocol::instance_models::ComputationInstance;
use pcs_protocol::ipc::Event;
use pcs_protocol::status_models::PipelineStage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

/// Registry of stage services and the entry point for running them.
#[derive(Default)]
pub struct StageRunner {
    services: HashMap<PipelineStage, Arc<dyn StageService>>,
}

impl StageRunner {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Register a service under the stage it reports.
    ///
    /// A later registration for the same stage replaces the earlier one.
    pub fn with_service(mut self, service: Arc<dyn StageService>) -> Self {
        self.register(service);
        self
    }

    pub fn register(&mut self, service: Arc<dyn StageService>) {
        self.services.insert(service.stage(), service);
    }

    pub fn has_stage(&self, stage: PipelineStage) -> bool {
        self.services.contains_key(&stage)
    }

    /// Registered stages in pipeline order.
    pub fn stages(&self) -> Vec<PipelineStage> {
        let mut stages: Vec<_> = self.services.keys().copied().collect();
        stages.sort();
        stages
    }

    /// Run a single stage on `instance`.
    ///
    /// Stage failures are reported through the returned outcome and the
    /// instance status, never as an error. Events are published without
    /// waiting on `events_tx`; when the channel is full they are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No service is registered for `stage`
    /// - The instance's current status does not allow `stage` to start
    pub async fn run_stage(
        &self,
        instance: &mut ComputationInstance,
        stage: PipelineStage,
        events_tx: &Sender<Event>,
    ) -> Result<StageOutcome> {
        let service = self
            .services
            .get(&stage)
            .ok_or_else(|| anyhow!("No stage service registered for {stage}"))?;

        if !can_start(instance, stage) {
            bail!(
                "Instance {} cannot start {stage} from status {}",
                instance.instance_id,
                instance.status
            );
        }

        tracing::info!(instance_id = %instance.instance_id, %stage, "starting stage");
        start_stage(instance, stage, events_tx);

        let outcome = service.run(instance).await;

        finish_stage(instance, stage, &outcome, events_tx);
        Ok(outcome)
    }

    /// Run whichever stage comes next for `instance`.
    ///
    /// Returns `Ok(None)` when there is nothing to run: a stage is in
    /// flight, the last stage failed, or the pipeline is finished.
    ///
    /// # Errors
    ///
    /// Same as [`StageRunner::run_stage`].
    pub async fn run_next_stage(
        &self,
        instance: &mut ComputationInstance,
        events_tx: &Sender<Event>,
    ) -> Result<Option<StageOutcome>> {
        match next_stage(instance) {
            Some(stage) => self.run_stage(instance, stage, events_tx).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::InputDataValidationStageService;
    use crate::state::instance::create_instance;
    use crate::storage::MockStorage;
    use pcs_protocol::instance_models::{GameType, Role};
    use pcs_protocol::status_models::InstanceStatus;
    use tokio::sync::mpsc;

    fn test_instance() -> ComputationInstance {
        create_instance(
            "123".to_string(),
            Role::Partner,
            GameType::Lift,
            "456".to_string(),
            "789".to_string(),
        )
    }

    fn runner_with(storage: MockStorage) -> StageRunner {
        StageRunner::new().with_service(Arc::new(InputDataValidationStageService::new(
            Arc::new(storage),
        )))
    }

    #[test]
    fn test_stage_runner_registration() {
        let runner = runner_with(MockStorage::present());
        assert!(runner.has_stage(PipelineStage::InputDataValidation));
        assert!(!runner.has_stage(PipelineStage::IdMatch));
        assert_eq!(runner.stages(), vec![PipelineStage::InputDataValidation]);
    }

    #[tokio::test]
    async fn test_run_stage_completed() {
        let runner = runner_with(MockStorage::present());
        let mut instance = test_instance();
        let (tx, _rx) = mpsc::channel(10);

        let outcome = runner
            .run_stage(&mut instance, PipelineStage::InputDataValidation, &tx)
            .await
            .unwrap();

        assert!(outcome.is_completed());
        assert_eq!(
            instance.status,
            InstanceStatus::completed(PipelineStage::InputDataValidation)
        );
    }

    #[tokio::test]
    async fn test_run_stage_failure_is_not_an_error() {
        let runner = runner_with(MockStorage::failing("storage down"));
        let mut instance = test_instance();
        let (tx, _rx) = mpsc::channel(10);

        let outcome = runner
            .run_stage(&mut instance, PipelineStage::InputDataValidation, &tx)
            .await
            .unwrap();

        assert!(!outcome.is_completed());
        assert_eq!(
            instance.status,
            InstanceStatus::failed(PipelineStage::InputDataValidation)
        );
    }

    #[tokio::test]
    async fn test_run_stage_unregistered() {
        let runner = runner_with(MockStorage::present());
        let mut instance = test_instance();
        instance.status = InstanceStatus::completed(PipelineStage::InputDataValidation);
        let (tx, _rx) = mpsc::channel(10);

        let result = runner
            .run_stage(&mut instance, PipelineStage::IdMatch, &tx)
            .await;

        assert!(result.is_err());
        assert_eq!(
            instance.status,
            InstanceStatus::completed(PipelineStage::InputDataValidation)
        );
    }

    #[tokio::test]
    async fn test_run_stage_rejects_out_of_order_start() {
        let runner = runner_with(MockStorage::present());
        let mut instance = test_instance();
        instance.status = InstanceStatus::completed(PipelineStage::InputDataValidation);
        let (tx, _rx) = mpsc::channel(10);

        let result = runner
            .run_stage(&mut instance, PipelineStage::InputDataValidation, &tx)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_next_stage() {
        let runner = runner_with(MockStorage::present());
        let mut instance = test_instance();
        let (tx, _rx) = mpsc::channel(10);

        let outcome = runner.run_next_stage(&mut instance, &tx).await.unwrap();
        assert_eq!(outcome, Some(StageOutcome::Completed));

        // ID matching is next but nothing is registered for it.
        assert!(runner.run_next_stage(&mut instance, &tx).await.is_err());
    }

    #[tokio::test]
    async fn test_run_next_stage_after_failure() {
        let runner = runner_with(MockStorage::absent());
        let mut instance = test_instance();
        let (tx, _rx) = mpsc::channel(10);

        runner.run_next_stage(&mut instance, &tx).await.unwrap();
        let outcome = runner.run_next_stage(&mut instance, &tx).await.unwrap();

        assert_eq!(outcome, None);
    }
}
