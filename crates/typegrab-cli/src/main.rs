//! typegrab: copy the inferred type at a cursor position

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use typegrab_cli::commands;
use typegrab_cli::{Cli, Commands};
use typegrab_core::{CommandKind, CommandOutcome};

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the copied type
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    let outcome = match command {
        Commands::CopyType(args) => {
            commands::copy::run(CommandKind::CopyTypeAtCursor, &args).await?
        }
        Commands::CopyVariableType(args) => {
            commands::copy::run(CommandKind::CopyVariableType, &args).await?
        }
        Commands::Serve(args) => {
            commands::serve::run(&args).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Files(args) => {
            commands::files::run(&args.dir, &args.walk.into())?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(match outcome {
        CommandOutcome::Copied(_) => ExitCode::SUCCESS,
        CommandOutcome::Warning(_) => ExitCode::from(1),
        CommandOutcome::Error(_) => ExitCode::from(2),
    })
}
