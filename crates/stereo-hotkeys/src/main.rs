//! Binary entrypoint for `stereo-hotkeys`.
use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use stereo_hotkeys::commands::{self, ReplayArgs};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "stereo-hotkeys",
    about = "Hotkeys for live stereo depth and convergence",
    version
)]
/// Command-line interface for the `stereo-hotkeys` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate a profile then exit.
    Check {
        /// Profile to check (defaults to ~/.stereo-hotkeys/default_config.json)
        path: Option<PathBuf>,

        /// Dump the parsed profile as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Write the default profile if it does not exist yet.
    Init {
        /// Directory to write into (defaults to ~/.stereo-hotkeys)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Drive the engine from a recorded input trace.
    Replay {
        /// Trace file (JSON list of frames)
        trace: PathBuf,

        /// Profile to use
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Poll rate in Hz (defaults to the profile's display_frequency)
        #[arg(long, value_name = "HZ")]
        rate: Option<f64>,

        /// Write stored hotkey values back to the profile
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log.spec());
    debug!(command = ?cli.command, "starting");

    let result = match cli.command {
        Command::Check { path, dump } => commands::check(path.as_deref(), dump).map(|out| {
            println!("{out}");
        }),
        Command::Init { dir } => commands::init(dir.as_deref()).map(|path| {
            println!("{}", path.display());
        }),
        Command::Replay {
            trace,
            config,
            rate,
            save,
        } => commands::replay(&ReplayArgs {
            trace,
            config,
            rate,
            save,
        })
        .map(|summary| {
            println!(
                "ticks={} stores={} depth={} convergence={}{}",
                summary.ticks,
                summary.stores,
                summary.final_params.depth,
                summary.final_params.convergence,
                if summary.cancelled { " (interrupted)" } else { "" }
            );
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e.pretty());
        process::exit(1);
    }
}
