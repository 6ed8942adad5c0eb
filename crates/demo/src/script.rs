//! Line commands understood by the demo host.

use std::str::FromStr;

use thiserror::Error;

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Press the configured shortcut.
	Toggle,
	/// Replace the query text, as the search field would.
	Type(String),
	Up,
	Down,
	Enter,
	Escape,
	/// Click outside the overlay.
	Dismiss,
	/// Print the current state without changing it.
	Show,
	Help,
	Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("unknown command `{0}` (try `help`)")]
	Unknown(String),
	#[error("`{0}` takes no argument")]
	UnexpectedArgument(&'static str),
}

pub const HELP: &str = "\
commands:
  toggle         press the jump bar shortcut
  type <text>    set the query text (empty clears it)
  up | down      move the focused suggestion
  enter          trigger the focused suggestion
  esc            cancel
  dismiss        click outside the overlay
  show           print the current state
  quit";

impl FromStr for Command {
	type Err = ParseError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let line = line.trim();
		let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let rest = rest.trim();

		let bare = |command: Command, name: &'static str| {
			if rest.is_empty() {
				Ok(command)
			} else {
				Err(ParseError::UnexpectedArgument(name))
			}
		};

		match word.to_ascii_lowercase().as_str() {
			"type" | "t" => Ok(Self::Type(rest.to_string())),
			"toggle" | "k" => bare(Self::Toggle, "toggle"),
			"up" => bare(Self::Up, "up"),
			"down" => bare(Self::Down, "down"),
			"enter" => bare(Self::Enter, "enter"),
			"esc" | "escape" => bare(Self::Escape, "esc"),
			"dismiss" => bare(Self::Dismiss, "dismiss"),
			"show" => bare(Self::Show, "show"),
			"help" | "?" => bare(Self::Help, "help"),
			"quit" | "q" | "exit" => bare(Self::Quit, "quit"),
			_ => Err(ParseError::Unknown(word.to_string())),
		}
	}
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}
	line.parse().map(Some)
}
