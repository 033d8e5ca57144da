//! Config inspection commands

use anyhow::{Context, Result};
use clap::Subcommand;
use hookshot_core::GameConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the default configuration as TOML
    Default,

    /// Load and validate a configuration file
    Check {
        /// Path to game config (TOML)
        file: String,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Default => {
            let text = GameConfig::default().to_toml_string()?;
            print!("{}", text);
            Ok(())
        }
        ConfigCommands::Check { file } => {
            let config = GameConfig::load(&file)
                .with_context(|| format!("Config '{}' did not pass validation", file))?;

            println!("{}: ok", file);
            println!("  rope policy: {:?}", config.rope.policy);
            println!(
                "  world: {} solid(s), {} hookable area(s)",
                config.world.solids.len(),
                config.world.hookables.len()
            );
            Ok(())
        }
    }
}
