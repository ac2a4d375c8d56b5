use anyhow::Result;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let (_, resolver) = super::resolver(cli)?;
    println!("{}", resolver.active_theme()?);
    Ok(())
}
