pub mod batch;
pub mod check;
pub mod comment;
pub mod prompt;
pub mod util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "goban-commentary",
    version,
    about = "LLM commentary for key moves of analyzed Go games"
)]
pub struct Cli {
    /// Config file (default: ~/.goban-commentary.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline steps at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Comment on one analyzed move and print the annotation
    Comment {
        /// Move analysis JSON file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Language code for the commentary (overrides config)
        #[arg(long)]
        language: Option<String>,

        /// Trigger threshold (overrides config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Comment even when the swing is below the threshold
        #[arg(long)]
        force: bool,
    },

    /// Comment on every move in a JSON array and print the results as JSON
    Batch {
        /// Move analysis JSON array file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Language code for the commentary (overrides config)
        #[arg(long)]
        language: Option<String>,

        /// Trigger threshold (overrides config)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the prompt that would be sent for a move, without calling the model
    Prompt {
        /// Move analysis JSON file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Language code (overrides config)
        #[arg(long)]
        language: Option<String>,
    },

    /// Verify the configured API key against the provider
    Check,
}
