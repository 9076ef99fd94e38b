//! CLI adapter for vidsplit
//!
//! Provides the command-line interface over the core pipeline and
//! publisher. Commands only parse arguments, call into `core/` and
//! format results.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// vidsplit - parallel chunk reader and annotation filter
///
/// Split large video files into fixed-size chunks read by a pool of
/// workers, and publish annotations that match an entity allow-list
/// and confidence threshold.
#[derive(Parser, Debug)]
#[command(name = "vidsplit")]
#[command(version)]
#[command(about = "Parallel chunk reader and annotation filter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log line format (logs go to stderr)
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain text
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split files into fixed-size chunks with a pool of workers
    #[command(name = "split-files")]
    SplitFiles(commands::SplitArgs),

    /// Filter annotation records and publish matches to a topic
    #[command(name = "filter-annotations")]
    FilterAnnotations(commands::FilterArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  vidsplit completions bash > ~/.local/share/bash-completion/completions/vidsplit
    ///   zsh:   vidsplit completions zsh > ~/.zfunc/_vidsplit
    ///   fish:  vidsplit completions fish > ~/.config/fish/completions/vidsplit.fish
    Completions(commands::CompletionsArgs),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default `vidsplit=info` filter.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vidsplit=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {e}");
    }
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let services = Arc::new(Services::new(config));

    match cli.command {
        Commands::SplitFiles(args) => commands::split::execute(args, &services, cli.format).await,
        Commands::FilterAnnotations(args) => {
            commands::filter::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
