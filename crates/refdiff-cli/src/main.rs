use anyhow::Result;
use clap::Parser;

use refdiff_cli::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Check { file, json } => refdiff_cli::cli::check::run(file.as_deref(), json),
        Commands::Tasks { select } => refdiff_cli::cli::tasks::run(&select),
        Commands::Stage(args) => refdiff_cli::cli::stage::run(&args),
        Commands::Openapi { compact } => refdiff_cli::cli::openapi::run(compact),
    }
}
