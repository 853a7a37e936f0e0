//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Physics tutor CLI
#[derive(Parser, Debug)]
#[command(name = "tutorctl")]
#[command(about = "Physics Intelligent Tutoring System", long_about = None)]
#[command(version = env!("TUTOR_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $TUTOR_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ontology file (.toml or .json), overrides the configured path
    #[arg(long, global = true)]
    pub ontology: Option<PathBuf>,

    /// Color output: auto, always, never
    #[arg(long, global = true)]
    pub color: Option<String>,

    /// Subcommand (if not provided, starts the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the concepts in the ontology
    Concepts {
        /// Class to list instead of the configured concept class
        #[arg(long)]
        class: Option<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show the examples of a concept
    Examples {
        concept: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the questions of a concept with their hints
    Questions {
        concept: String,

        #[arg(long)]
        json: bool,
    },

    /// Answer the first question of a concept
    Check {
        concept: String,

        answer: String,

        #[arg(long)]
        json: bool,
    },

    /// Launch the TUI (same as running without a subcommand)
    #[command(hide = true)]
    Tui,
}
