//! Subcommand implementations.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use lintpad_codec::PermalinkToken;
use lintpad_config::Config;
use lintpad_engine::{CommandEngine, CommandSpec, EngineHandle};
use lintpad_session::{
	AnalysisScheduler, DEFAULT_SOURCE, ErrorBanner, MemoryEditor, PageLocation, SessionController, SummaryRow,
	load_startup_source,
};
use lintpad_source::{HttpFetcher, SourceReference, SourceResolver, parse_remote_url};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::SourceArgs;

fn resolver() -> SourceResolver {
	SourceResolver::new(Arc::new(HttpFetcher::new()))
}

fn base_location(config: &Config) -> anyhow::Result<PageLocation> {
	PageLocation::parse(&config.permalink.base_url)
		.with_context(|| format!("invalid permalink base URL {:?}", config.permalink.base_url))
}

/// `lintpad check`: one analysis run through the session controller.
pub async fn check(config: &Config, args: &SourceArgs) -> anyhow::Result<ExitCode> {
	let resolver = resolver();
	let text = load_source(args, &resolver).await?;

	let engine = CommandEngine::load(CommandSpec {
		program: config.engine.command.clone(),
		args: config.engine.args.clone(),
		success_exit_codes: config.engine.success_exit_codes.clone(),
	})
	.context("cannot load the analysis engine")?;

	let mut controller = SessionController::new(
		MemoryEditor::with_text(&text),
		resolver,
		base_location(config)?,
		AnalysisScheduler::new(config.scheduler.quiet_period()),
	);
	controller.install_engine(EngineHandle::from_engine(engine));
	controller.analyze_now();
	controller.settle().await;

	let panel = controller.panel();
	match panel.error() {
		Some(ErrorBanner::Message(message)) => bail!("{message}"),
		Some(banner @ ErrorBanner::Problems(_)) => {
			for row in panel.rows() {
				println!("{}", format_row(row));
			}
			eprintln!("{}", banner.text());
			Ok(ExitCode::FAILURE)
		}
		None => {
			eprintln!("no problems found");
			Ok(ExitCode::SUCCESS)
		}
	}
}

/// `lintpad permalink`: prints `<base>#<token>` for a file or stdin.
pub async fn permalink(config: &Config, file: Option<&Path>) -> anyhow::Result<ExitCode> {
	let text = read_input(file).await?;
	let token = lintpad_codec::encode(&text);
	let mut location = base_location(config)?;
	location.set_fragment(&token);
	println!("{location}");
	Ok(ExitCode::SUCCESS)
}

/// `lintpad open`: prints the workflow a permalink carries.
pub async fn open(target: &str) -> anyhow::Result<ExitCode> {
	let text = resolve_permalink(target, &resolver()).await?;
	println!("{text}");
	Ok(ExitCode::SUCCESS)
}

async fn load_source(args: &SourceArgs, resolver: &SourceResolver) -> anyhow::Result<String> {
	if let Some(text) = &args.source {
		return Ok(text.clone());
	}
	if let Some(input) = &args.url {
		let url = parse_remote_url(input)?;
		let text = resolver
			.fetch_remote(&url)
			.await
			.with_context(|| format!("Incorrect input {input:?}"))?;
		return Ok(text);
	}
	if let Some(target) = &args.permalink {
		return resolve_permalink(target, resolver).await;
	}
	if let Some(file) = &args.file {
		return read_input(Some(file)).await;
	}
	debug!("cli.default_source");
	Ok(DEFAULT_SOURCE.to_string())
}

/// Resolves a playground URL (`?s=`, `?u=` or fragment) or a bare token.
async fn resolve_permalink(target: &str, resolver: &SourceResolver) -> anyhow::Result<String> {
	let Ok(location) = PageLocation::parse(target) else {
		let reference = SourceReference::CompressedFragment(PermalinkToken::from_raw(target));
		info!(kind = reference.kind(), "cli.resolve_permalink");
		return resolver
			.resolve(&reference)
			.await
			.with_context(|| format!("Incorrect input {target:?}"));
	};

	let startup = load_startup_source(&location, resolver).await;
	if let Some(err) = startup.error {
		return Err(err).with_context(|| format!("Incorrect input {target:?}"));
	}
	if startup.origin == "default" {
		bail!("{target} does not carry a workflow");
	}
	info!(kind = startup.origin, "cli.resolve_permalink");
	Ok(startup.text)
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
	match file {
		Some(path) if path != Path::new("-") => {
			std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
		}
		_ => {
			let mut text = String::new();
			tokio::io::stdin()
				.read_to_string(&mut text)
				.await
				.context("failed to read stdin")?;
			Ok(text)
		}
	}
}

/// One output line: `line:L, col:C  message [kind]`.
fn format_row(row: &SummaryRow) -> String {
	format!(
		"{}  {} [{}]",
		row.position_tag,
		strip_ansi_escapes::strip_str(row.message_text()),
		row.kind
	)
}
