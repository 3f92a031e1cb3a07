use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
use cli::{Cli, Commands};

/// Initialize tracing on stderr, keeping stdout for command output.
///
/// Records from the `log` facade used by strata-settings are forwarded too.
fn init_simple_tracing(log_level: Option<&String>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'warn'", level);
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        debug!("Global tracing subscriber already initialized, skipping");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let registry = commands::load_registry(cli.definitions.as_deref())?;

    match cli.command {
        Commands::Get {
            key,
            kind,
            extruder,
            limited,
            inputs,
        } => {
            let document = commands::load_document(cli.settings.as_deref(), &inputs)?;
            let value = commands::run_get(&document, &registry, &key, kind, extruder, limited)?;
            println!("{}", value);
        }
        Commands::Args { inputs } => {
            let document = commands::load_document(cli.settings.as_deref(), &inputs)?;
            println!("{}", commands::run_args(&document, &registry));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_simple_tracing(cli.log_level.as_ref()) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(commands::exit_code(&e).clamp(1, 255) as u8)
        }
    }
}
