mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use getaway_core::Storefront;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands don't need a storefront
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Dates(args) => commands::dates::handle(&args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "getaway", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the storefront, resuming the profile's cart
        cmd => {
            let (profile_name, storefront_config) = config::build_storefront_config(&cli.global)?;
            let cart_id = config::resume_cart(&profile_name, &storefront_config);
            let storefront = Storefront::resume(storefront_config, cart_id).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &storefront, &cli.global).await;
            config::remember_cart(&profile_name, &storefront).await?;
            result
        }
    }
}
