//! Root CLI structure for rig-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::pose::PoseArgs;

#[derive(Parser)]
#[command(name = "rig-rs")]
#[command(about = "Inspect glTF skeletons, animations and skinning poses", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display a summary of a glTF asset
    Info {
        /// Path to the .gltf or .glb file
        file: PathBuf,

        /// Show per-animation and per-skin tables
        #[arg(short, long)]
        detailed: bool,
    },

    /// Display the node hierarchy of the active scene as a tree
    Tree {
        /// Path to the .gltf or .glb file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show node details inline
        #[arg(short, long)]
        compact: bool,
    },

    /// Check hierarchy, skins and animation channels
    Validate {
        /// Path to the .gltf or .glb file
        file: PathBuf,
    },

    /// Evaluate the pose at a given time and print joint matrices
    Pose(PoseArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
