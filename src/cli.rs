use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CONFIG_FILE_NAME;
use crate::context::Context;

#[derive(Parser)]
#[command(
    name = "linux-icons",
    about = "Resolve freedesktop icon theme names to files and image bytes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Icon theme to resolve against (default: the desktop's active theme)
    #[arg(long, global = true)]
    pub theme: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the file an icon name resolves to
    Path {
        #[command(flatten)]
        request: RequestArgs,

        /// Print every matching file across the inheritance chain
        #[arg(long)]
        all: bool,
    },

    /// Write the icon's displayable bytes (SVG icons are rendered to PNG)
    Export {
        #[command(flatten)]
        request: RequestArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the inheritance chain of a theme
    Chain {
        /// Theme to start from (default: the active theme)
        name: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the active icon theme name
    Theme,
}

#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    /// Icon name, e.g. "network-wireless"
    pub name: String,

    /// Requested size in pixels (default: from config)
    #[arg(long)]
    pub size: Option<u32>,

    /// Acceptable contexts (comma-separated, default: from config)
    #[arg(long, value_delimiter = ',')]
    pub context: Option<Vec<Context>>,
}
