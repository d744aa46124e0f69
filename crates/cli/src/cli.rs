//! Command line definition for `pcs`.

use clap::{Parser, Subcommand, ValueEnum};
use pcs_protocol::instance_models::{GameType, Role};
use std::path::PathBuf;

/// pcs - private computation stage runner
///
/// Creates computation instances and drives them through pipeline stages.
#[derive(Parser, Debug)]
#[command(name = "pcs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root holding the optional `.pcs/config.toml`
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new instance in CREATED status
    Create {
        /// Instance id (a random UUID when omitted)
        #[arg(long)]
        instance_id: Option<String>,

        #[arg(long, value_enum)]
        role: RoleArg,

        #[arg(long, value_enum, default_value = "lift")]
        game_type: GameTypeArg,

        /// Location of the input data
        #[arg(long)]
        input_path: String,

        #[arg(long)]
        output_dir: String,

        /// Write the instance here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run input data validation on an instance file
    Validate {
        /// Instance JSON file
        instance: PathBuf,

        /// Write the updated instance back to the file instead of stdout
        #[arg(long)]
        in_place: bool,
    },

    /// Print the status of an instance file
    Status {
        /// Instance JSON file
        instance: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum RoleArg {
    Publisher,
    Partner,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Publisher => Role::Publisher,
            RoleArg::Partner => Role::Partner,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum GameTypeArg {
    Lift,
    Attribution,
}

impl From<GameTypeArg> for GameType {
    fn from(game_type: GameTypeArg) -> Self {
        match game_type {
            GameTypeArg::Lift => GameType::Lift,
            GameTypeArg::Attribution => GameType::Attribution,
        }
    }
}
