use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lintpad")]
#[command(about = "Lint GitHub Actions workflows and share them as permalinks")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to $XDG_CONFIG_HOME/lintpad/config.toml)
	#[arg(long, short = 'c', global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run the linter once and print the diagnostics
	Check {
		/// Where the workflow comes from.
		#[command(flatten)]
		source: SourceArgs,
	},
	/// Print a shareable permalink for a workflow
	Permalink {
		/// Workflow file ("-" or omitted reads stdin)
		file: Option<PathBuf>,
	},
	/// Print the workflow stored in a permalink or playground URL
	Open {
		/// Playground URL or bare permalink token
		target: String,
	},
}

/// Source selection for `check`. At most one may be given; without any, the
/// built-in sample workflow is checked.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
	/// Literal workflow text
	#[arg(long, value_name = "TEXT")]
	pub source: Option<String>,

	/// Remote workflow URL (GitHub blob and gist URLs are fetched raw)
	#[arg(long, value_name = "URL")]
	pub url: Option<String>,

	/// Playground URL or bare permalink token
	#[arg(long, value_name = "URL_OR_TOKEN")]
	pub permalink: Option<String>,

	/// Workflow file ("-" reads stdin)
	pub file: Option<PathBuf>,
}
