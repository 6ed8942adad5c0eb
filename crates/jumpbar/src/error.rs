//! Error types for the jump bar.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single suggestion provider call.
///
/// These never interrupt input: the session logs them and keeps the
/// previous suggestion list.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// The provider reported a failure.
	#[error("provider failed: {0}")]
	Failed(String),

	/// The provider task panicked or was cancelled before completing.
	#[error("provider task aborted: {0}")]
	Aborted(String),

	/// Any other provider-side error.
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or structure.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A shortcut chord could not be parsed.
	#[error("invalid shortcut '{chord}': {reason}")]
	InvalidShortcut {
		/// The chord as written.
		chord: String,
		/// What was wrong with it.
		reason: &'static str,
	},
}

/// Errors raised while assembling a [`JumpBar`](crate::JumpBar).
#[derive(Debug, Error)]
pub enum JumpBarError {
	/// No Tokio runtime was running and none was supplied.
	#[error("no Tokio runtime available to run suggestion queries")]
	NoRuntime,

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
