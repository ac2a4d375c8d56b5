use anyhow::{bail, Result};

use crate::cli::{Cli, RequestArgs};

pub async fn run(cli: &Cli, args: &RequestArgs, all: bool) -> Result<()> {
    let (config, resolver) = super::resolver(cli)?;
    let (size, contexts) = super::request(&config, args)?;

    if all {
        let mut rx = resolver.resolve_icon_paths_stream(&args.name, size, contexts)?;
        let mut count = 0;
        while let Some(path) = rx.recv().await {
            println!("{}", path.display());
            count += 1;
        }
        if count == 0 {
            bail!("Icon '{}' not found at {}px", args.name, size);
        }
        return Ok(());
    }

    match resolver.resolve_icon_path(&args.name, size, contexts)? {
        Some(path) => println!("{}", path.display()),
        None => bail!("Icon '{}' not found at {}px", args.name, size),
    }

    Ok(())
}
