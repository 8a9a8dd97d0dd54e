use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber.
///
/// With `LINTPAD_LOG_DIR` set, logs go to `lintpad.<pid>.log` in that
/// directory, filtered by `RUST_LOG` when present. Otherwise warnings go to
/// stderr so they do not mix with command output.
pub fn setup_tracing(verbose: bool) {
	if let Some(log_dir) = std::env::var("LINTPAD_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("lintpad.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
				if verbose {
					EnvFilter::new("lintpad=trace,debug")
				} else {
					EnvFilter::new("lintpad=debug,info")
				}
			});

			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(filter).with(file_layer).init();

			tracing::info!(path = ?log_path, "cli.tracing_initialized");
			return;
		}
	}

	// `check` prints rows on stdout and its summary on stderr; lifecycle
	// events at INFO would interleave with that summary.
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.init();
}
