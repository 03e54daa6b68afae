mod cli;
mod commands;
mod config;
mod error;
mod menu;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dnac_api::DnacClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if cli.global.output.is_none() {
        let cfg = config::load_config_or_default();
        cli.global.output = Some(config::default_output(&cfg));
    }

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
    match cli.command.unwrap_or(Command::Menu) {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "dnac", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let settings = config::resolve_settings(&cli.global)?;
            let mut client = DnacClient::new(
                settings.base_url,
                settings.credentials,
                &settings.transport,
            )?;
            tracing::debug!(url = %client.base_url(), "using controller");

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut client, &cli.global).await
        }
    }
}
