//! zettelgraph CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use zettelgraph::cli::args::{Cli, Commands};
use zettelgraph::cli::output::Output;
use zettelgraph::cli::{backlinks, graph, link_ratio, links};
use zettelgraph::config::Config;
use zettelgraph::error::{ExitCode as ZettelExitCode, ZettelError};
use zettelgraph::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_env("ZETTELGRAPH_LOG")
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code().code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<ZettelExitCode, ZettelError> {
    // Load config
    let config = Config::load()?;

    // Resolve vault path
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path, &config)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Graph(args) => graph::run(&vault, &config, args, &output)?,
        Commands::Links(args) => links::run(&vault, args, &output)?,
        Commands::Backlinks(args) => backlinks::run(&vault, args, &output)?,
        Commands::LinkRatio(args) => link_ratio::run(&vault, args, &output)?,
    }

    Ok(ZettelExitCode::Success)
}
