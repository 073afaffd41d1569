//! Refract CLI - model-aware prompt enhancement for image generation.
//!
//! Refract rewrites a short image prompt into one tailored to the target image
//! model, using a remote chat-completion service. If the service is slow or
//! unavailable, the original prompt is printed unchanged.
//!
//! # Usage
//!
//! ```bash
//! # Enhance a generation prompt for FLUX
//! refract enhance "a cozy bookstore" --model flux --seed 42
//!
//! # Turn an edit request into a Kontext command
//! refract enhance "make him a viking" --model kontext --image portrait.jpg
//!
//! # See which models support which tasks
//! refract models list
//!
//! # View configuration
//! refract config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Refract - model-aware prompt enhancement for image generation.
#[derive(Parser, Debug)]
#[command(name = "refract")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite a prompt for a target image model
    Enhance(cli::enhance::EnhanceArgs),

    /// Inspect the instruction catalog
    Models(cli::models::ModelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match refract_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `refract config path`."
            );
            refract_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Refract v{}", refract_core::VERSION);

    match cli.command {
        Commands::Enhance(args) => cli::enhance::execute(args).await,
        Commands::Models(args) => cli::models::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
