//! Lifecycle status models for computation instances.
//!
//! Every pipeline stage owns one `STARTED -> COMPLETED | FAILED` triple.
//! Statuses are modelled as a sum of the stage and its phase so that code
//! holding a [`PipelineStage`] can only ever build statuses from that
//! stage's own triple. On the wire each status is the flat
//! `SCREAMING_SNAKE_CASE` name the orchestrator expects, e.g.
//! `INPUT_DATA_VALIDATION_STARTED`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A discrete step of the private computation pipeline.
///
/// Variants are declared in pipeline order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStage {
    /// Checks that the instance's input data is present in storage.
    #[serde(rename = "INPUT_DATA_VALIDATION")]
    InputDataValidation,

    /// Private ID matching between the two parties.
    #[serde(rename = "ID_MATCHING")]
    IdMatch,

    /// Secure multi-party computation of the metrics.
    #[serde(rename = "COMPUTATION")]
    Compute,

    /// Aggregation of the per-shard results.
    #[serde(rename = "AGGREGATION")]
    Aggregate,

    /// Post processing handlers run on the aggregated output.
    #[serde(rename = "POST_PROCESSING_HANDLERS")]
    PostProcessingHandlers,
}

impl PipelineStage {
    /// All stages, in the order the pipeline runs them.
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::InputDataValidation,
        PipelineStage::IdMatch,
        PipelineStage::Compute,
        PipelineStage::Aggregate,
        PipelineStage::PostProcessingHandlers,
    ];

    /// The first stage of the pipeline.
    pub fn first() -> Self {
        PipelineStage::InputDataValidation
    }

    /// Wire prefix shared by the stage's three statuses.
    pub fn prefix(self) -> &'static str {
        match self {
            PipelineStage::InputDataValidation => "INPUT_DATA_VALIDATION",
            PipelineStage::IdMatch => "ID_MATCHING",
            PipelineStage::Compute => "COMPUTATION",
            PipelineStage::Aggregate => "AGGREGATION",
            PipelineStage::PostProcessingHandlers => "POST_PROCESSING_HANDLERS",
        }
    }

    /// The stage that runs after this one, if any.
    pub fn next(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// The stage that runs before this one, if any.
    pub fn previous(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Position of an instance within a single stage's triple.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StagePhase {
    /// Set by the orchestrator before the stage service is invoked.
    Started,

    /// Terminal success for the stage.
    Completed,

    /// Terminal failure for the stage.
    Failed,
}

impl StagePhase {
    fn suffix(self) -> &'static str {
        match self {
            StagePhase::Started => "STARTED",
            StagePhase::Completed => "COMPLETED",
            StagePhase::Failed => "FAILED",
        }
    }
}

/// Error returned when a status name is not one of the known statuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusParseError {
    #[error("Unknown instance status: {0}")]
    Unknown(String),
}

/// Current lifecycle status of a computation instance.
///
/// Serialized as the flat status name, see [`InstanceStatus::as_str`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum InstanceStatus {
    /// The instance exists but no stage has started yet.
    Created,

    /// The instance is somewhere inside the given stage's triple.
    Stage(PipelineStage, StagePhase),
}

impl InstanceStatus {
    pub fn started(stage: PipelineStage) -> Self {
        InstanceStatus::Stage(stage, StagePhase::Started)
    }

    pub fn completed(stage: PipelineStage) -> Self {
        InstanceStatus::Stage(stage, StagePhase::Completed)
    }

    pub fn failed(stage: PipelineStage) -> Self {
        InstanceStatus::Stage(stage, StagePhase::Failed)
    }

    /// The stage this status belongs to, `None` for [`InstanceStatus::Created`].
    pub fn stage(self) -> Option<PipelineStage> {
        match self {
            InstanceStatus::Created => None,
            InstanceStatus::Stage(stage, _) => Some(stage),
        }
    }

    pub fn phase(self) -> Option<StagePhase> {
        match self {
            InstanceStatus::Created => None,
            InstanceStatus::Stage(_, phase) => Some(phase),
        }
    }

    /// Whether the status is a stage's `COMPLETED` or `FAILED`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self.phase(),
            Some(StagePhase::Completed) | Some(StagePhase::Failed)
        )
    }

    /// Every status the pipeline knows about.
    pub fn all() -> impl Iterator<Item = InstanceStatus> {
        std::iter::once(InstanceStatus::Created).chain(PipelineStage::ALL.into_iter().flat_map(
            |stage| {
                [
                    StagePhase::Started,
                    StagePhase::Completed,
                    StagePhase::Failed,
                ]
                .into_iter()
                .map(move |phase| InstanceStatus::Stage(stage, phase))
            },
        ))
    }

    /// The wire name of this status.
    pub fn as_str(self) -> &'static str {
        use PipelineStage::*;
        use StagePhase::*;

        match self {
            InstanceStatus::Created => "CREATED",
            InstanceStatus::Stage(InputDataValidation, Started) => "INPUT_DATA_VALIDATION_STARTED",
            InstanceStatus::Stage(InputDataValidation, Completed) => {
                "INPUT_DATA_VALIDATION_COMPLETED"
            }
            InstanceStatus::Stage(InputDataValidation, Failed) => "INPUT_DATA_VALIDATION_FAILED",
            InstanceStatus::Stage(IdMatch, Started) => "ID_MATCHING_STARTED",
            InstanceStatus::Stage(IdMatch, Completed) => "ID_MATCHING_COMPLETED",
            InstanceStatus::Stage(IdMatch, Failed) => "ID_MATCHING_FAILED",
            InstanceStatus::Stage(Compute, Started) => "COMPUTATION_STARTED",
            InstanceStatus::Stage(Compute, Completed) => "COMPUTATION_COMPLETED",
            InstanceStatus::Stage(Compute, Failed) => "COMPUTATION_FAILED",
            InstanceStatus::Stage(Aggregate, Started) => "AGGREGATION_STARTED",
            InstanceStatus::Stage(Aggregate, Completed) => "AGGREGATION_COMPLETED",
            InstanceStatus::Stage(Aggregate, Failed) => "AGGREGATION_FAILED",
            InstanceStatus::Stage(PostProcessingHandlers, Started) => {
                "POST_PROCESSING_HANDLERS_STARTED"
            }
            InstanceStatus::Stage(PostProcessingHandlers, Completed) => {
                "POST_PROCESSING_HANDLERS_COMPLETED"
            }
            InstanceStatus::Stage(PostProcessingHandlers, Failed) => {
                "POST_PROCESSING_HANDLERS_FAILED"
            }
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstanceStatus::all()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError::Unknown(s.to_string()))
    }
}

impl TryFrom<String> for InstanceStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstanceStatus> for String {
    fn from(status: InstanceStatus) -> Self {
        status.as_str().to_string()
    }
}
