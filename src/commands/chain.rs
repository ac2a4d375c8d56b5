use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::Cli;
use crate::theme::ThemeDescriptor;

#[derive(Debug, Serialize)]
pub struct ChainEntry {
    pub name: String,
    pub display_name: Option<String>,
    pub path: String,
    pub directories: usize,
    pub inherits: Vec<String>,
}

impl ChainEntry {
    pub fn from_descriptor(descriptor: &ThemeDescriptor) -> Self {
        let name = descriptor
            .root_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            display_name: descriptor.name.clone(),
            path: descriptor.root_path().display().to_string(),
            directories: descriptor.directories.len(),
            inherits: descriptor.inherits_from.clone(),
        }
    }
}

pub fn run(cli: &Cli, name: Option<&str>, json: bool) -> Result<()> {
    let (_, resolver) = super::resolver(cli)?;
    let theme = match name {
        Some(name) => name.to_string(),
        None => resolver.active_theme()?,
    };

    let entries: Vec<ChainEntry> = resolver
        .chain(&theme)?
        .iter()
        .map(|d| ChainEntry::from_descriptor(d))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{} Theme '{}' not found", "!".yellow(), theme);
        return Ok(());
    }

    println!("{:<4} {:<24} {:<6} Path", "#", "Theme", "Dirs");
    println!("{}", "-".repeat(70));
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<6} {}",
            i + 1,
            entry.name,
            entry.directories,
            entry.path
        );
    }
    println!("\nTotal: {}", entries.len());

    Ok(())
}
