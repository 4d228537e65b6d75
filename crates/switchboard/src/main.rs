// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchboard - routes telecom support conversations to specialist policies.
//!
//! This binary inspects and validates a Switchboard configuration. It does not
//! talk to a language model; `classify` uses keyword routing only.

mod inspect;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use switchboard_config::SwitchboardConfig;
use switchboard_core::{IssueCategory, SwitchboardError};

/// Switchboard - routes telecom support conversations to specialist policies.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration and every policy source it references.
    Check,
    /// List categories in priority order with their keywords.
    Categories,
    /// Route a message with the keyword router.
    Classify {
        /// The customer's message.
        message: String,
    },
    /// Print the composed instructions for a category's specialist.
    Prompt {
        /// Category label, e.g. `mms_issue`.
        #[arg(value_parser = inspect::parse_category)]
        category: IssueCategory,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => switchboard_config::load_and_validate_path(path),
        None => switchboard_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            switchboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    let color = !cli.plain && std::io::stdout().is_terminal();

    let Some(command) = cli.command else {
        println!("switchboard: use --help for available commands");
        return;
    };

    match run(command, &config, color).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            if color {
                eprintln!("{}: {e}", "error".red());
            } else {
                eprintln!("error: {e}");
            }
            std::process::exit(1);
        }
    }
}

async fn run(
    command: Commands,
    config: &SwitchboardConfig,
    color: bool,
) -> Result<String, SwitchboardError> {
    tracing::debug!(?command, "running command");
    match command {
        Commands::Check => inspect::run_check(config, color).await,
        Commands::Categories => {
            let taxonomy = inspect::load_taxonomy(config).await?;
            Ok(inspect::render_categories(&taxonomy, color))
        }
        Commands::Classify { message } => {
            let taxonomy = inspect::load_taxonomy(config).await?;
            let decision = inspect::classify(taxonomy, &message);
            Ok(inspect::render_decision(&decision, color))
        }
        Commands::Prompt { category } => {
            let taxonomy = inspect::load_taxonomy(config).await?;
            let mut prompt = inspect::render_prompt(taxonomy, category)?;
            prompt.push('\n');
            Ok(prompt)
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
