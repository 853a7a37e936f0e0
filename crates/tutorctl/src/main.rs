//! tutorctl - Physics Intelligent Tutoring System
//!
//! Loads the ontology once, then either runs the TUI or a one-shot
//! subcommand against it.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tutor_common::config::TutorConfig;
use tutor_common::Store;

use tutorctl::cli::{Cli, Commands};
use tutorctl::commands;
use tutorctl::errors::{EXIT_GENERAL_ERROR, EXIT_LOAD_FAILED, EXIT_SUCCESS};
use tutorctl::logging::{self, LogTarget};
use tutorctl::output::{display_error, Output};

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            display_error(&Output::plain(), &format!("{:#}", e));
            EXIT_GENERAL_ERROR
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = TutorConfig::load(cli.config.as_deref())?.with_ontology_override(cli.ontology);
    if let Some(mode) = &cli.color {
        config.set_color_mode(mode)?;
    }

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    let target = if interactive {
        LogTarget::FileOnly
    } else {
        LogTarget::Stderr
    };
    logging::init(&config.logging, target)?;

    let out = Output::new(config.output.color);

    info!("tutorctl v{} starting", env!("TUTOR_VERSION"));
    let store = match Store::load(&config.ontology.path) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, code = e.code(), "Failed to load ontology");
            display_error(&out, &format!("Error loading ontology: {}", e));
            return Ok(EXIT_LOAD_FAILED);
        }
    };
    info!("Ontology loaded successfully");

    let class = config.ontology.concept_class.as_str();
    let result = match cli.command {
        None | Some(Commands::Tui) => {
            tutorctl::tui::run(&store, class)?;
            return Ok(EXIT_SUCCESS);
        }
        Some(Commands::Concepts { class: override_class, json }) => {
            commands::concepts(&store, override_class.as_deref().unwrap_or(class), json, &out)?
        }
        Some(Commands::Examples { concept, json }) => {
            commands::examples(&store, &concept, json, &out)?
        }
        Some(Commands::Questions { concept, json }) => {
            commands::questions(&store, &concept, json, &out)?
        }
        Some(Commands::Check {
            concept,
            answer,
            json,
        }) => commands::check(&store, &concept, &answer, json, &out)?,
    };

    println!("{}", result.text);
    Ok(result.exit_code)
}
