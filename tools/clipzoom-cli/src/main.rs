//! Clipzoom CLI: assemble and edit recording projects.
//!
//! Usage:
//!   clipzoom init <NAME> --screen <SRC> --events <LOG>   Build a project from a recording
//!   clipzoom info <PROJECT>                              Show project information
//!   clipzoom analyze <PROJECT> --events <LOG>            Recompute auto-zoom keyframes
//!   clipzoom split <PROJECT> --at-ms <T>                 Razor the timeline at a playhead
//!   clipzoom validate <PROJECT>                          Check project invariants

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clipzoom_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "clipzoom",
    about = "Timeline editing and auto-zoom for screen recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a new project from a finished recording
    Init {
        /// Project name
        name: String,

        /// Screen source metadata (JSON)
        #[arg(long)]
        screen: PathBuf,

        /// Camera source metadata (JSON)
        #[arg(long)]
        camera: Option<PathBuf>,

        /// Captured event log (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,

        /// Output directory (defaults to the configured projects directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable auto-zoom keyframes
        #[arg(long)]
        no_auto_zoom: bool,
    },

    /// Show project information
    Info {
        /// Path to the project file or directory
        path: PathBuf,
    },

    /// Recompute auto-zoom keyframes from an event log
    Analyze {
        /// Path to the project file or directory
        path: PathBuf,

        /// Captured event log (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,

        /// Override the project's zoom intensity
        #[arg(long)]
        intensity: Option<f64>,
    },

    /// Split clips under the playhead
    Split {
        /// Path to the project file or directory
        path: PathBuf,

        /// Playhead position in milliseconds
        #[arg(long)]
        at_ms: f64,

        /// Only hit this track directly (linked clips still follow)
        #[arg(long)]
        track: Option<uuid::Uuid>,
    },

    /// Validate project invariants
    Validate {
        /// Path to the project file or directory
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = AppConfig::try_load();
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    clipzoom_common::logging::init_logging(&logging);
    if let Err(e) = &loaded {
        tracing::warn!(
            "Failed to load config at {:?}, using defaults: {}",
            AppConfig::path(),
            e
        );
    }
    tracing::debug!(projects_dir = %config.projects_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Init {
            name,
            screen,
            camera,
            events,
            output,
            no_auto_zoom,
        } => commands::init::run(
            &config,
            name,
            screen,
            camera,
            events,
            output,
            !no_auto_zoom,
        ),
        Commands::Info { path } => commands::info::run(path),
        Commands::Analyze {
            path,
            events,
            intensity,
        } => commands::analyze::run(path, events, intensity),
        Commands::Split { path, at_ms, track } => commands::split::run(path, at_ms, track),
        Commands::Validate { path } => commands::validate::run(path),
    }
}
