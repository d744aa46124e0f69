//! Command implementations.

use crate::cli::Commands;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use pcs_core::config::models::AppConfig;
use pcs_core::engine::StageRunner;
use pcs_core::stages::{InputDataValidationStageService, StageOutcome};
use pcs_core::state::instance::create_instance;
use pcs_core::storage::LocalStorageService;
use pcs_protocol::instance_models::ComputationInstance;
use pcs_protocol::status_models::PipelineStage;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Exit code when the stage ran but ended in FAILED.
const STAGE_FAILED_EXIT_CODE: u8 = 2;

pub async fn execute(command: Commands, config: &AppConfig) -> Result<ExitCode> {
    match command {
        Commands::Create {
            instance_id,
            role,
            game_type,
            input_path,
            output_dir,
            out,
        } => {
            let instance_id = instance_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let instance = create_instance(
                instance_id,
                role.into(),
                game_type.into(),
                input_path,
                output_dir,
            );
            match out {
                Some(path) => write_instance(&path, &instance).await?,
                None => println!("{}", serde_json::to_string_pretty(&instance)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { instance, in_place } => validate(&instance, in_place, config).await,
        Commands::Status { instance } => {
            let instance = read_instance(&instance).await?;
            println!("{}", instance.status);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn validate(path: &Path, in_place: bool, config: &AppConfig) -> Result<ExitCode> {
    let mut instance = read_instance(path).await?;

    let storage = match &config.storage.root {
        Some(root) => LocalStorageService::with_root(root.clone()),
        None => LocalStorageService::new(),
    };
    let runner = StageRunner::new().with_service(Arc::new(InputDataValidationStageService::new(
        Arc::new(storage),
    )));

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let outcome = runner
        .run_stage(
            &mut instance,
            PipelineStage::InputDataValidation,
            &events_tx,
        )
        .await
        .map_err(|e| eyre!("{e:#}"))?;
    drop(events_tx);

    while let Some(event) = events_rx.recv().await {
        tracing::debug!(?event, "stage event");
    }

    match &outcome {
        StageOutcome::Completed => {
            eprintln!("{} {}", "✓".green().bold(), instance.status.to_string().green());
        }
        StageOutcome::Failed(reason) => {
            eprintln!(
                "{} {} ({})",
                "✗".red().bold(),
                instance.status.to_string().red(),
                reason
            );
        }
    }

    if in_place {
        write_instance(path, &instance).await?;
    } else {
        println!("{}", serde_json::to_string_pretty(&instance)?);
    }

    if outcome.is_completed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(STAGE_FAILED_EXIT_CODE))
    }
}

async fn read_instance(path: &Path) -> Result<ComputationInstance> {
    let content = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read instance file {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse instance file {}", path.display()))
}

async fn write_instance(path: &Path, instance: &ComputationInstance) -> Result<()> {
    let json = serde_json::to_string_pretty(instance)?;
    tokio::fs::write(path, json)
        .await
        .wrap_err_with(|| format!("Failed to write instance file {}", path.display()))
}
