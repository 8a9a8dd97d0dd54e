//! `lintpad` binary.
//!
//! Hosts the playground session on the command line:
//! - `check` runs the linter once over a file, URL, permalink or the sample
//! - `permalink` encodes a workflow into a shareable URL
//! - `open` decodes a permalink back into the workflow text

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use lintpad_config::Config;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	logging::setup_tracing(cli.verbose);

	let config = Config::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
	info!(command = ?cli.command, "cli.start");

	match &cli.command {
		Command::Check { source } => commands::check(&config, source).await,
		Command::Permalink { file } => commands::permalink(&config, file.as_deref()).await,
		Command::Open { target } => commands::open(target).await,
	}
}
