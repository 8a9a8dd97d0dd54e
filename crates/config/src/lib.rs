//! Configuration for lintpad.
//!
//! Configuration is written in TOML. Every key is optional; missing keys take
//! the defaults shown here:
//!
//! ```toml
//! [scheduler]
//! quiet-period-ms = 300
//! constrained-quiet-period-ms = 1000
//! constrained = false
//!
//! [engine]
//! command = "actionlint"
//! args = ["-format", "{{json .}}", "-"]
//! success-exit-codes = [0, 1]
//!
//! [permalink]
//! base-url = "https://rhysd.github.io/actionlint/"
//! ```
//!
//! # Configuration Files
//!
//! Without an explicit path, lintpad reads `$XDG_CONFIG_HOME/lintpad/config.toml`
//! (or the platform equivalent). A missing default file is not an error.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

pub use error::{ConfigError, Result};

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
	pub scheduler: SchedulerConfig,
	pub engine: EngineConfig,
	pub permalink: PermalinkConfig,
}

/// Analysis debounce settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SchedulerConfig {
	/// Quiet period after the last edit on regular clients.
	pub quiet_period_ms: u64,
	/// Quiet period on capability-constrained (phone-class) clients.
	pub constrained_quiet_period_ms: u64,
	/// Whether this client is capability-constrained.
	pub constrained: bool,
}

impl Default for SchedulerConfig {
	fn default() -> Self {
		Self {
			quiet_period_ms: 300,
			constrained_quiet_period_ms: 1000,
			constrained: false,
		}
	}
}

impl SchedulerConfig {
	/// Quiet period for this client.
	pub fn quiet_period(&self) -> Duration {
		Duration::from_millis(if self.constrained {
			self.constrained_quiet_period_ms
		} else {
			self.quiet_period_ms
		})
	}
}

/// External linter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EngineConfig {
	pub command: String,
	pub args: Vec<String>,
	pub success_exit_codes: Vec<i32>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			command: "actionlint".to_string(),
			args: vec!["-format".to_string(), "{{json .}}".to_string(), "-".to_string()],
			success_exit_codes: vec![0, 1],
		}
	}
}

/// Permalink settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PermalinkConfig {
	/// Page URL the permalink fragment is attached to.
	pub base_url: String,
}

impl Default for PermalinkConfig {
	fn default() -> Self {
		Self {
			base_url: "https://rhysd.github.io/actionlint/".to_string(),
		}
	}
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		debug!(path = %path.display(), "config.load");
		Self::parse(&content)
	}

	/// Loads `explicit` if given, otherwise the default file if it exists,
	/// otherwise the built-in defaults.
	pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	fn validate(&self) -> Result<()> {
		if self.engine.command.trim().is_empty() {
			return Err(ConfigError::MissingField("engine.command".to_string()));
		}
		if self.permalink.base_url.trim().is_empty() {
			return Err(ConfigError::MissingField("permalink.base-url".to_string()));
		}
		Ok(())
	}
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("lintpad").join("config.toml"))
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_input_gives_defaults() {
		assert_eq!(Config::parse("").unwrap(), Config::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = Config::parse(
			r#"
			[scheduler]
			constrained = true

			[engine]
			command = "/opt/bin/actionlint"
			"#,
		)
		.unwrap();

		assert_eq!(config.scheduler.quiet_period(), Duration::from_millis(1000));
		assert_eq!(config.engine.command, "/opt/bin/actionlint");
		assert_eq!(config.engine.success_exit_codes, vec![0, 1]);
		assert_eq!(config.permalink, PermalinkConfig::default());
	}

	#[test]
	fn desktop_quiet_period() {
		let config = Config::parse("[scheduler]\nquiet-period-ms = 150\n").unwrap();
		assert_eq!(config.scheduler.quiet_period(), Duration::from_millis(150));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = Config::parse("[scheduler]\ndebounce = 5\n").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
	}

	#[test]
	fn empty_command_is_rejected() {
		let err = Config::parse("[engine]\ncommand = \"\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "engine.command"), "{err:?}");
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[permalink]\nbase-url = \"https://example.com/play/\"").unwrap();

		let config = Config::load_or_default(Some(file.path())).unwrap();
		assert_eq!(config.permalink.base_url, "https://example.com/play/");
	}

	#[test]
	fn explicit_missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = Config::load_or_default(Some(&dir.path().join("nope.toml"))).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
	}
}
