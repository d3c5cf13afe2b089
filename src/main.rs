use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use versecraft::types::VerseError;

#[derive(Parser)]
#[command(name = "versecraft")]
#[command(
    version,
    about = "AI song pack generator: lyrics and style prompts for generative audio"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate ten songs from a topic and a rhythm/style description
    Generate {
        #[arg(long, short, help = "What the songs are about")]
        topic: Option<String>,
        #[arg(long, short, help = "Rhythm/style target (genre, tempo, vocals)")]
        style: Option<String>,
        #[arg(long, help = "Export the result as a PDF to this path")]
        pdf: Option<PathBuf>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(
            long,
            env = "VERSECRAFT_PASSPHRASE",
            hide_env_values = true,
            help = "Gate passphrase (prompted for when omitted)"
        )]
        passphrase: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Generation failures collapse into one generic user message;
            // everything else prints as-is.
            let message = e
                .downcast_ref::<VerseError>()
                .map(VerseError::user_message)
                .unwrap_or_else(|| e.to_string());
            eprintln!("\x1b[31mError:\x1b[0m {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            topic,
            style,
            pdf,
            model,
            passphrase,
        } => {
            versecraft::cli::commands::generate::run(
                versecraft::cli::commands::generate::GenerateOptions {
                    topic,
                    style,
                    pdf,
                    model,
                    passphrase,
                },
            )?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                versecraft::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                versecraft::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    versecraft::cli::commands::config::init_global(force)?;
                } else {
                    versecraft::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
