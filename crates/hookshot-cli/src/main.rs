//! Hookshot CLI - headless driver for the grapple core

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, simulate};

#[derive(Parser)]
#[command(name = "hookshot")]
#[command(about = "Headless driver for the two-handed grapple core", long_about = None)]
#[command(version)]
struct Cli {
    /// Log mode transitions and lifecycle events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted simulation and print a per-frame trace
    Simulate {
        /// Path to game config (TOML)
        config: String,

        /// Input script (TOML); idle input when omitted
        #[arg(long)]
        script: Option<String>,

        /// Number of frames to run; defaults to the script length
        #[arg(long)]
        frames: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Include rope polylines in the trace
        #[arg(long)]
        ropes: bool,
    },

    /// Configuration tools
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let directive = if verbose { "hookshot=debug" } else { "hookshot=info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Simulate {
            config,
            script,
            frames,
            format,
            ropes,
        } => simulate::run(simulate::SimulateArgs {
            config,
            script,
            frames,
            format,
            ropes,
        }),
        Commands::Config(cmd) => config::run(cmd),
    }
}
