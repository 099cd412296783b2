//! civicctl - terminal front end for the Civic Desk chatbot

use clap::Parser;
use civicctl::cli::{Cli, Commands};
use civicctl::{commands, errors, logging};
use std::io;

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = commands::load_config(&cli)?;
    let stdout = io::stdout();

    match cli.command {
        Commands::Chat { id } => commands::chat(&config, id.as_deref()),
        Commands::Ask { id, json, question } => {
            commands::ask(&config, &id, &question, json, &mut stdout.lock())
        }
        Commands::Topics => commands::topics(&config, &mut stdout.lock()),
        Commands::Config => commands::show_config(&config, &mut stdout.lock()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli) {
        Ok(()) => errors::EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {:#}", e);
            errors::exit_code_for(&e)
        }
    };
    std::process::exit(code);
}
