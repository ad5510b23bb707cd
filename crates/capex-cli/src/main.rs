use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use config::HostConfig;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let mut config = HostConfig::load(cli.config.as_deref())?;
    if let Some(state) = &cli.state {
        config.state_path = state.clone();
    }

    let default_filter = if cli.verbose { "debug" } else { config.log_filter.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli, &config)
}
