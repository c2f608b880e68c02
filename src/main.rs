// Entrypoint for the CLI application.
// - Parses flags once into an immutable `Config`.
// - Sets up logging, then hands off to the api/ui modules.
// - Any error is logged and the process exits with status 1.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use apifox_import::api::ApiClient;
use apifox_import::config::{Cli, Config};
use apifox_import::transport::ReqwestTransport;
use apifox_import::ui;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn run(config: Config) -> anyhow::Result<()> {
    match config {
        Config::Version(info) => ui::print_version(&mut io::stdout(), &info)?,
        Config::Import {
            file,
            verbose,
            import,
        } => {
            let api = ApiClient::new(ReqwestTransport::new(import.timeout)?);
            let outcome = ui::run_import(&api, &file, &import)?;
            ui::report(&mut io::stdout(), &outcome, verbose)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    init_logging(matches!(config, Config::Import { verbose: true, .. }));

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
