//! Computation instance state machine.
//!
//! This module provides functions for moving a ComputationInstance between
//! statuses, stamping `status_update_ts` on every change and emitting events.

use crate::stages::base::StageOutcome;
use pcs_protocol::instance_models::{ComputationInstance, GameType, Role};
use pcs_protocol::ipc::Event;
use pcs_protocol::status_models::{InstanceStatus, PipelineStage, StagePhase};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;

/// Current time as unix seconds.
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Create a new ComputationInstance with Created status.
///
/// Container counts default to one; sub-instances start empty.
pub fn create_instance(
    instance_id: String,
    role: Role,
    game_type: GameType,
    input_path: String,
    output_dir: String,
) -> ComputationInstance {
    ComputationInstance {
        instance_id,
        role,
        game_type,
        status: InstanceStatus::Created,
        status_update_ts: now_ts(),
        input_path,
        output_dir,
        instances: Vec::new(),
        num_pid_containers: 1,
        num_mpc_containers: 1,
        num_files_per_mpc_container: 1,
    }
}

/// Set the status and stamp the update time.
pub fn update_status(instance: &mut ComputationInstance, status: InstanceStatus) {
    instance.status = status;
    instance.status_update_ts = now_ts();
}

/// Whether `stage` may be started from the instance's current status.
///
/// A stage may start once the previous stage completed (or from Created for
/// the first stage). Restarting a stage that is Started or Failed is
/// allowed, which is how an orchestrator retries.
pub fn can_start(instance: &ComputationInstance, stage: PipelineStage) -> bool {
    match instance.status {
        InstanceStatus::Created => stage == PipelineStage::first(),
        InstanceStatus::Stage(current, phase) if current == stage => {
            matches!(phase, StagePhase::Started | StagePhase::Failed)
        }
        InstanceStatus::Stage(current, StagePhase::Completed) => current.next() == Some(stage),
        InstanceStatus::Stage(_, _) => false,
    }
}

/// The stage an orchestrator should run next, if any.
///
/// `None` while a stage is in flight, after a failure, or once the last
/// stage completed.
pub fn next_stage(instance: &ComputationInstance) -> Option<PipelineStage> {
    match instance.status {
        InstanceStatus::Created => Some(PipelineStage::first()),
        InstanceStatus::Stage(current, StagePhase::Completed) => current.next(),
        InstanceStatus::Stage(_, _) => None,
    }
}

/// Move the instance to the stage's Started status and emit events.
pub fn start_stage(
    instance: &mut ComputationInstance,
    stage: PipelineStage,
    events_tx: &Sender<Event>,
) {
    update_status(instance, InstanceStatus::started(stage));
    publish(
        events_tx,
        Event::StageStarted {
            instance_id: instance.instance_id.clone(),
            stage,
        },
    );
    publish_status_update(instance, events_tx);
}

/// Record the terminal status a stage service wrote and emit events.
///
/// The stage service only writes `status`; this stamps the update time and
/// publishes the outcome, including the failure reason.
pub fn finish_stage(
    instance: &mut ComputationInstance,
    stage: PipelineStage,
    outcome: &StageOutcome,
    events_tx: &Sender<Event>,
) {
    update_status(instance, outcome.status_for(stage));
    publish_status_update(instance, events_tx);

    let event = match outcome {
        StageOutcome::Completed => Event::StageCompleted {
            instance_id: instance.instance_id.clone(),
            stage,
        },
        StageOutcome::Failed(reason) => Event::StageFailed {
            instance_id: instance.instance_id.clone(),
            stage,
            reason: reason.to_string(),
        },
    };
    publish(events_tx, event);
}

fn publish_status_update(instance: &ComputationInstance, events_tx: &Sender<Event>) {
    publish(
        events_tx,
        Event::StatusUpdate {
            instance_id: instance.instance_id.clone(),
            status: instance.status,
            status_update_ts: instance.status_update_ts,
        },
    );
}

/// Events are best effort: a full or closed channel drops the event rather
/// than holding up the stage transition.
fn publish(events_tx: &Sender<Event>, event: Event) {
    match events_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!(?event, "event channel full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {}
    }
}
