//! Command-line surface for civicctl

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "civicctl")]
#[command(about = "Civic Desk - municipal services FAQ chatbot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (overrides the default search path)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Citizen records CSV (overrides config)
    #[arg(long, global = true)]
    pub citizens: Option<PathBuf>,

    /// FAQ table TOML (overrides config)
    #[arg(long, global = true)]
    pub faq: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and chat interactively
    Chat {
        /// Citizen ID (prompted for when omitted)
        #[arg(long, allow_hyphen_values = true)]
        id: Option<String>,
    },

    /// Ask a single question and print the reply
    Ask {
        /// Citizen ID
        #[arg(long, allow_hyphen_values = true)]
        id: String,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,

        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// List FAQ topics
    Topics,

    /// Print the effective configuration
    Config,
}
