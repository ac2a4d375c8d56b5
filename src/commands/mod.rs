pub mod chain;
pub mod export;
pub mod init;
pub mod path;
pub mod theme;

use anyhow::{bail, Context as _, Result};

use crate::cli::{Cli, RequestArgs};
use crate::config::Config;
use crate::context::ContextSet;
use crate::resolver::IconResolver;

/// Loads the config and builds a resolver honoring `--theme`.
pub fn resolver(cli: &Cli) -> Result<(Config, IconResolver)> {
    let mut config = Config::load(&cli.config)?;
    if let Some(theme) = &cli.theme {
        config.theme = Some(theme.clone());
    }
    let resolver = IconResolver::new(&config);
    Ok((config, resolver))
}

/// Size and contexts of a request, with config defaults filled in.
pub fn request(config: &Config, args: &RequestArgs) -> Result<(u32, ContextSet)> {
    let size = args.size.unwrap_or(config.size);
    if size == 0 {
        bail!("--size must be a positive number of pixels");
    }
    let contexts = match &args.context {
        Some(contexts) => ContextSet::new(contexts.iter().copied()),
        None => config.context_set(),
    }
    .context("At least one context is required")?;
    Ok((size, contexts))
}
