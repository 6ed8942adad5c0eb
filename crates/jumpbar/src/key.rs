//! Key presses and the toggle shortcut chord.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Key modifiers (Ctrl, Alt, Shift, Meta).
///
/// `meta` covers Command on macOS and Super elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Meta (Command/Super) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Only Meta pressed.
	pub const META: Self = Self { meta: true, ..Self::NONE };

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.meta
	}
}

/// Keys the jump bar distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Char(char),
	Up,
	Down,
	Enter,
	Escape,
	Tab,
	Backspace,
	Other,
}

/// A key press as delivered by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl KeyPress {
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// A key press without modifiers.
	pub const fn plain(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}
}

impl From<KeyCode> for KeyPress {
	fn from(code: KeyCode) -> Self {
		Self::plain(code)
	}
}

/// Modifier chord plus a character key that toggles the jump bar.
///
/// Written as `+`-separated tokens, modifiers first: `cmd+k`, `ctrl+shift+p`.
/// `cmd`, `super` and `meta` are synonyms; `control` and `option` are
/// accepted for `ctrl` and `alt`. Matching is case-insensitive on the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Shortcut {
	pub modifiers: Modifiers,
	pub key: char,
}

impl Shortcut {
	pub fn new(modifiers: Modifiers, key: char) -> Self {
		Self {
			modifiers,
			key: key.to_ascii_lowercase(),
		}
	}

	/// Returns true if `press` is this chord.
	pub fn matches(&self, press: &KeyPress) -> bool {
		match press.code {
			KeyCode::Char(c) => c.to_ascii_lowercase() == self.key && press.modifiers == self.modifiers,
			_ => false,
		}
	}
}

impl Default for Shortcut {
	fn default() -> Self {
		Self::new(Modifiers::META, 'k')
	}
}

impl FromStr for Shortcut {
	type Err = ConfigError;

	fn from_str(chord: &str) -> Result<Self, Self::Err> {
		let invalid = |reason| ConfigError::InvalidShortcut {
			chord: chord.to_string(),
			reason,
		};

		let mut tokens: Vec<&str> = chord.split('+').map(str::trim).collect();
		let Some(key_token) = tokens.pop() else {
			return Err(invalid("empty chord"));
		};

		let mut key_chars = key_token.chars();
		let key = match (key_chars.next(), key_chars.next()) {
			(Some(c), None) if !c.is_whitespace() => c,
			(None, _) => return Err(invalid("missing key")),
			_ => return Err(invalid("key must be a single character")),
		};

		let mut modifiers = Modifiers::NONE;
		for token in tokens {
			let flag = match token.to_ascii_lowercase().as_str() {
				"ctrl" | "control" => &mut modifiers.ctrl,
				"alt" | "option" => &mut modifiers.alt,
				"shift" => &mut modifiers.shift,
				"cmd" | "command" | "super" | "meta" => &mut modifiers.meta,
				"" => return Err(invalid("empty modifier")),
				_ => return Err(invalid("unknown modifier")),
			};
			if *flag {
				return Err(invalid("duplicate modifier"));
			}
			*flag = true;
		}

		if modifiers.is_empty() {
			return Err(invalid("shortcut needs at least one modifier"));
		}

		Ok(Self::new(modifiers, key))
	}
}

impl TryFrom<String> for Shortcut {
	type Error = ConfigError;

	fn try_from(chord: String) -> Result<Self, Self::Error> {
		chord.parse()
	}
}

impl fmt::Display for Shortcut {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.ctrl {
			f.write_str("ctrl+")?;
		}
		if self.modifiers.alt {
			f.write_str("alt+")?;
		}
		if self.modifiers.shift {
			f.write_str("shift+")?;
		}
		if self.modifiers.meta {
			f.write_str("cmd+")?;
		}
		write!(f, "{}", self.key)
	}
}

impl From<Shortcut> for String {
	fn from(shortcut: Shortcut) -> Self {
		shortcut.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_default_chord() {
		let shortcut: Shortcut = "cmd+k".parse().unwrap();
		assert_eq!(shortcut, Shortcut::default());
		assert_eq!(shortcut.to_string(), "cmd+k");
	}

	#[test]
	fn parses_synonyms_and_case() {
		let shortcut: Shortcut = "Control + Shift + P".parse().unwrap();
		assert_eq!(shortcut.modifiers, Modifiers::CTRL.shift());
		assert_eq!(shortcut.key, 'p');
		assert_eq!("super+k".parse::<Shortcut>().unwrap(), Shortcut::default());
	}

	#[test]
	fn rejects_malformed_chords() {
		for chord in ["", "k", "cmd+", "cmd+kk", "hyper+k", "ctrl+ctrl+k", "ctrl++k"] {
			assert!(
				matches!(chord.parse::<Shortcut>(), Err(ConfigError::InvalidShortcut { .. })),
				"{chord:?} should be rejected"
			);
		}
	}

	#[test]
	fn matches_requires_exact_modifiers() {
		let shortcut = Shortcut::default();
		assert!(shortcut.matches(&KeyPress::new(KeyCode::Char('k'), Modifiers::META)));
		assert!(shortcut.matches(&KeyPress::new(KeyCode::Char('K'), Modifiers::META)));
		assert!(!shortcut.matches(&KeyPress::new(KeyCode::Char('k'), Modifiers::META.shift())));
		assert!(!shortcut.matches(&KeyPress::plain(KeyCode::Char('k'))));
		assert!(!shortcut.matches(&KeyPress::new(KeyCode::Enter, Modifiers::META)));
	}
}
