use anyhow::Result;
use clap::Parser;
use linux_icons::cli::{Cli, Commands};
use linux_icons::commands;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { force } => commands::init::run(&cli, *force),
        Commands::Path { request, all } => commands::path::run(&cli, request, *all).await,
        Commands::Export { request, output } => {
            commands::export::run(&cli, request, output.as_deref()).await
        }
        Commands::Chain { name, json } => commands::chain::run(&cli, name.as_deref(), *json),
        Commands::Theme => commands::theme::run(&cli),
    }
}
