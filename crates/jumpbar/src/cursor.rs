//! Focused-suggestion cursor.
//!
//! Focus is tracked by identifier rather than index, so a list that is
//! renamed, reordered or truncated under the user keeps the same suggestion
//! focused whenever it is still present.

use crate::suggestion::{Suggestion, SuggestionId};

/// Tracks which suggestion is focused.
///
/// The cursor does not own the list; every operation takes the current one.
/// Identifiers in that list must be unique. [`QuerySession`](crate::QuerySession)
/// drops repeats before storing a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
	focused: Option<SuggestionId>,
}

impl SelectionCursor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn focused(&self) -> Option<&SuggestionId> {
		self.focused.as_ref()
	}

	/// Position of the focused suggestion in `suggestions`.
	pub fn focused_index(&self, suggestions: &[Suggestion]) -> Option<usize> {
		let focused = self.focused.as_ref()?;
		suggestions.iter().position(|s| s.id() == focused)
	}

	/// Moves focus to the previous suggestion. No-op at the first one.
	///
	/// Returns true if focus moved.
	pub fn move_up(&mut self, suggestions: &[Suggestion]) -> bool {
		match self.focused_index(suggestions) {
			Some(idx) if idx > 0 => self.focus(&suggestions[idx - 1]),
			_ => false,
		}
	}

	/// Moves focus to the next suggestion. No-op at the last one.
	///
	/// Returns true if focus moved.
	pub fn move_down(&mut self, suggestions: &[Suggestion]) -> bool {
		match self.focused_index(suggestions) {
			Some(idx) if idx + 1 < suggestions.len() => self.focus(&suggestions[idx + 1]),
			_ => false,
		}
	}

	/// Re-derives focus after the list changed.
	///
	/// A focused identifier still present stays focused, even if its payload
	/// changed. Otherwise the first suggestion is focused, or nothing when the
	/// list is empty.
	pub fn reset(&mut self, suggestions: &[Suggestion]) {
		if self.focused_index(suggestions).is_some() {
			return;
		}
		let next = suggestions.first().map(|s| s.id().clone());
		if next != self.focused {
			tracing::trace!(from = ?self.focused, to = ?next, "jumpbar.cursor.reset");
		}
		self.focused = next;
	}

	/// Returns the focused suggestion, if any.
	pub fn select<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion> {
		self.focused_index(suggestions).map(|idx| &suggestions[idx])
	}

	pub fn clear(&mut self) {
		self.focused = None;
	}

	fn focus(&mut self, suggestion: &Suggestion) -> bool {
		self.focused = Some(suggestion.id().clone());
		true
	}
}
