use std::path::PathBuf;

use anyhow::{Context, Result};
use chatroster_cli::cli::{replay, write_transcript, CliConfig, Script};
use chatroster_cli::logging;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "chatroster")]
#[command(about = "Replay chat-list notification scripts through the reconciliation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script and print every renderer callback
    Replay {
        /// Script file (backend fixture plus events)
        script: PathBuf,

        /// Path to JSON config file (contains core engine settings)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Start with archived chats shown
        #[arg(long)]
        show_archived: bool,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a script without running it
    Check {
        /// Script file
        script: PathBuf,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay {
            script,
            config,
            show_archived,
            json,
        } => {
            let cli_config = match config {
                Some(path) => CliConfig::load(&path)?,
                None => CliConfig::default(),
            };
            let script = Script::load(&script)?;

            let core = cli_config.resolve(script.config.as_ref(), show_archived);
            let report = replay(script, core)?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_transcript(&report, json || cli_config.json, &mut out).context("Failed to write transcript")?;
        }
        Commands::Check { script: path } => {
            let script = Script::load(&path)?;
            let steps = script.validate()?;
            info!(steps, "script is valid");
            println!("{}: {} steps OK", path.display(), steps);
        }
    }
    Ok(())
}
