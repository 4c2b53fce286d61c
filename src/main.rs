use anyhow::Result;
use clap::Parser;
use petfriends_negative::cli::{Cli, Commands};
use petfriends_negative::{commands, config, exit_codes};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(exit_codes::from_error(&e))
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("petfriends_negative={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let mut ctx = config::Context::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        ctx.override_base_url(base_url);
    }
    if let Some(format) = cli.format {
        ctx.set_format(format);
    }
    ctx.set_no_color(cli.no_color);

    match cli.command {
        Commands::List => {
            commands::list::execute(&ctx)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Run(args) => commands::run::execute(&ctx, args).await,
        Commands::Config(command) => {
            commands::config::execute(&ctx, command)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
