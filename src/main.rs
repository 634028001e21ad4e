//! # Ledboard CLI
//!
//! Command-line interface for the LED sign bridge.
//!
//! ## Usage
//!
//! ```bash
//! # Run the bridge
//! ledboard run --config /etc/ledboard.json
//!
//! # Run with debug logging (RUST_LOG overrides)
//! ledboard run --config ledboard.json --debug
//!
//! # List available screens
//! ledboard screens
//!
//! # Show the datagram for a screen
//! ledboard screens alarm --text "Fenster offen"
//! ledboard screens laser-finished --seconds 3725 --pattern peel-off-left
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ledboard::{
    Config, LedboardError, app,
    protocol::frame,
    screen::{LaserFinishedPattern, ScreenArgs, ScreenKind},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Ledboard - LED sign bridge
#[derive(Parser, Debug)]
#[command(name = "ledboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to the bus and drive the sign until interrupted
    Run {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Log at debug level
        #[arg(long)]
        debug: bool,
    },

    /// Show a screen's datagram (omit the name to list screens)
    Screens {
        /// Screen name
        name: Option<String>,

        /// Message, title or nickname for screens that show text
        #[arg(long, default_value = "")]
        text: String,

        /// People present, for the idle screen
        #[arg(long, default_value = "0")]
        count: i64,

        /// Job duration in seconds, for the laser-finished screen
        #[arg(long, default_value = "0")]
        seconds: i64,

        /// Transition for the laser-finished screen (peel-off-left or peel-off-right)
        #[arg(long, value_parser = parse_pattern, required_if_eq("name", "laser-finished"))]
        pattern: Option<LaserFinishedPattern>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LedboardError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, debug } => {
            init_tracing(debug);
            let config = Config::load(&config)?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(app::run(config))
        }
        Commands::Screens {
            name,
            text,
            count,
            seconds,
            pattern,
        } => {
            let Some(name) = name else {
                println!("Available screens:");
                for kind in ScreenKind::ALL {
                    println!("  {}", kind);
                }
                return Ok(());
            };

            let kind: ScreenKind = name.parse()?;
            let args = ScreenArgs {
                text,
                member_count: count,
                duration_secs: seconds,
                laser_finished_pattern: pattern,
            };
            let screen = kind.compose(&args)?;
            let datagram = frame::store_screen(screen.as_bytes());

            println!("{} ({} bytes)", kind, datagram.len());
            println!("{}", datagram.escape_ascii());
            Ok(())
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "ledboard=debug" } else { "ledboard=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn parse_pattern(s: &str) -> Result<LaserFinishedPattern, String> {
    match s {
        "peel-off-left" => Ok(LaserFinishedPattern::PeelOffLeft),
        "peel-off-right" => Ok(LaserFinishedPattern::PeelOffRight),
        other => Err(format!(
            "unknown pattern '{}' (expected peel-off-left or peel-off-right)",
            other
        )),
    }
}
