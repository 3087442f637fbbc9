use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vidbrief_tui::config;

#[derive(Parser)]
#[command(name = "vidbrief", about = "Browse videos and read their summaries in the terminal")]
struct Cli {
    /// Config file to use instead of ~/.config/vidbrief/vidbrief.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server URL for this run (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Search query or video link to open on startup
    #[arg(long)]
    query: Option<String>,

    /// Where to write logs (default: ~/.config/vidbrief/vidbrief.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,

        /// Set the directory PDF exports are written to
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = config::resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Config { server, export_dir }) => {
            if server.is_none() && export_dir.is_none() {
                config::show_config(&config_path)
            } else {
                config::set_config(&config_path, server, export_dir)
            }
        }
        None => {
            let log_file = match cli.log_file {
                Some(path) => path,
                None => config::config_dir()?.join("vidbrief.log"),
            };
            init_logging(&log_file)?;

            let mut app_config = config::load_config(&config_path)?;
            config::apply_overrides(&mut app_config, cli.server, None);
            vidbrief_tui::run(vidbrief_tui::RunOptions {
                config: app_config,
                initial_query: cli.query,
            })
        }
    }
}

// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
