use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::{Cli, RequestArgs};

pub async fn run(cli: &Cli, args: &RequestArgs, output: Option<&Path>) -> Result<()> {
    let (config, resolver) = super::resolver(cli)?;
    let (size, contexts) = super::request(&config, args)?;

    let Some(bytes) = resolver
        .resolve_icon_bytes_async(&args.name, size, contexts)
        .await?
    else {
        bail!("Icon '{}' not found at {}px", args.name, size);
    };

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} ({} bytes)",
                "✓".green(),
                path.display(),
                bytes.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .context("Failed to write icon to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
