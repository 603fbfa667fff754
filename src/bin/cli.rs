// src/bin/cli.rs
use std::process::ExitCode;

use color_eyre::eyre::eyre;
use frota162_export::cli;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cmd = cli::parse_args(std::env::args().skip(1)).map_err(|e| eyre!(e))?;
    Ok(cli::execute(cmd))
}
