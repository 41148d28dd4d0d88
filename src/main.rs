use clap::Parser;
use commentary::cli::{Cli, Commands};
use commentary::config::CommentaryConfig;
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    let config = match CommentaryConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let level = if cli.verbose || config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Comment {
            input,
            language,
            threshold,
            force,
        } => commentary::cli::comment::run(config, input, language, threshold, force),
        Commands::Batch {
            input,
            language,
            threshold,
        } => commentary::cli::batch::run(config, input, language, threshold),
        Commands::Prompt { input, language } => {
            commentary::cli::prompt::run(config, input, language)
        }
        Commands::Check => commentary::cli::check::run(config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
