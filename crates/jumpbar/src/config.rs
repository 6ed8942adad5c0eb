//! Jump bar configuration.
//!
//! Configuration is plain TOML. Every field is optional:
//!
//! ```toml
//! shortcut = "cmd+k"
//! placeholder = "Jump to..."
//! debounce_ms = 150
//! reopen = "preserve"   # or "clear"
//! escape_closes = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::key::Shortcut;

/// What happens to the query and suggestion list across hide/show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReopenPolicy {
	/// Keep text and list; opening re-runs the query for the kept text.
	#[default]
	Preserve,
	/// Empty text, list and focus when the overlay hides.
	Clear,
}

/// Settings for one jump bar instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JumpBarConfig {
	/// Chord that toggles the overlay.
	pub shortcut: Shortcut,
	/// Placeholder shown in the empty search field.
	pub placeholder: String,
	/// Delay before a typed query reaches the provider. Unset or zero sends
	/// every edit immediately.
	pub debounce_ms: Option<u64>,
	/// Reopen behavior.
	pub reopen: ReopenPolicy,
	/// Whether Escape closes the overlay.
	pub escape_closes: bool,
}

impl Default for JumpBarConfig {
	fn default() -> Self {
		Self {
			shortcut: Shortcut::default(),
			placeholder: "Jump to...".to_string(),
			debounce_ms: None,
			reopen: ReopenPolicy::default(),
			escape_closes: true,
		}
	}
}

impl JumpBarConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&input)?;
		tracing::debug!(path = %path.display(), shortcut = %config.shortcut, "loaded jump bar config");
		Ok(config)
	}

	/// Debounce delay, or `None` when queries are issued immediately.
	pub fn debounce(&self) -> Option<Duration> {
		self.debounce_ms
			.filter(|ms| *ms > 0)
			.map(Duration::from_millis)
	}

	pub fn with_debounce(mut self, delay: Duration) -> Self {
		self.debounce_ms = Some(delay.as_millis().try_into().unwrap_or(u64::MAX));
		self
	}

	pub fn with_reopen(mut self, reopen: ReopenPolicy) -> Self {
		self.reopen = reopen;
		self
	}
}
