//! Dashboard entry-point: loads settings, wires the HTTP user store, and runs
//! one CLI command against the list controller.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Report, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::config::DashboardSettings;
use dashboard::domain::ListController;
use dashboard::inbound::cli::{CliArgs, CliError, RunOutcome, execute};
use dashboard::outbound::http::HttpUserStore;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<ExitCode> {
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard")])
        .map_err(|err| eyre!("load dashboard settings: {err}"))?
        .with_overrides(args.api_base_url, args.timeout_secs);
    let base = settings.api_base_url().wrap_err("parse API base URL")?;
    let store = HttpUserStore::new(base, settings.timeout()).wrap_err("build user store")?;
    let controller = ListController::new(Arc::new(store));

    let mut stdout = io::stdout().lock();
    match execute(&controller, args.command, &mut stdout).await {
        Ok(RunOutcome::Completed) => Ok(ExitCode::SUCCESS),
        Ok(RunOutcome::Rejected) => Ok(ExitCode::FAILURE),
        Err(CliError::Io(err)) => Err(Report::new(err).wrap_err("write output")),
        Err(err) => {
            let message = err.user_message();
            stdout.flush().wrap_err("flush output")?;
            Err(Report::new(err).wrap_err(message))
        }
    }
}
