use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;

pub fn run(cli: &Cli, force: bool) -> Result<()> {
    let config_path = &cli.config;

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    std::fs::write(config_path, Config::default_template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Created {}", "✓".green(), config_path.display());

    Ok(())
}
