//! The composed jump bar session.

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::{JumpBarConfig, ReopenPolicy};
use crate::cursor::SelectionCursor;
use crate::dispatch::{DispatchTarget, TriggerDispatcher};
use crate::error::JumpBarError;
use crate::key::{KeyCode, KeyPress};
use crate::provider::SuggestionSource;
use crate::query::{QueryOutcome, QuerySession};
use crate::suggestion::{Suggestion, SuggestionId};
use crate::task::TaskSpawner;
use crate::visibility::{CloseReason, Transition, Visibility, VisibilityState};

/// Result of routing one key press through [`JumpBar::handle_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The shortcut toggled the overlay.
	Toggled(Transition),
	/// Focus moved to another suggestion.
	Moved,
	/// The focused suggestion was triggered and dispatched.
	Triggered(SuggestionId),
	/// Escape closed the overlay.
	Closed(Transition),
	/// The key belongs to the jump bar but changed nothing.
	Handled,
	/// The key is not for the jump bar; the host should process it.
	Ignored,
}

/// Query session, cursor, visibility and dispatch for one overlay.
///
/// A `JumpBar` is owned by whatever composes the overlay. All methods are
/// called from the owning thread; provider work runs on Tokio tasks and is
/// applied through [`poll`](Self::poll) or [`next_update`](Self::next_update).
/// While hidden, pull results are stale and pushed lists are dropped; opening
/// resyncs from the provider.
#[derive(Debug)]
pub struct JumpBar {
	config: JumpBarConfig,
	query: QuerySession,
	cursor: SelectionCursor,
	visibility: VisibilityState,
	dispatcher: TriggerDispatcher,
}

impl JumpBar {
	/// Creates a hidden jump bar on the current Tokio runtime.
	pub fn new(config: JumpBarConfig, source: SuggestionSource, target: impl DispatchTarget + 'static) -> Result<Self, JumpBarError> {
		let spawner = TaskSpawner::current()?;
		Ok(Self::assemble(config, source, target, spawner))
	}

	/// Creates a hidden jump bar whose tasks run on `handle`.
	pub fn with_handle(config: JumpBarConfig, source: SuggestionSource, target: impl DispatchTarget + 'static, handle: Handle) -> Self {
		Self::assemble(config, source, target, TaskSpawner::new(handle))
	}

	fn assemble(config: JumpBarConfig, source: SuggestionSource, target: impl DispatchTarget + 'static, spawner: TaskSpawner) -> Self {
		let mut query = QuerySession::with_spawner(source, config.debounce(), spawner);
		query.suspend();
		Self {
			config,
			query,
			cursor: SelectionCursor::new(),
			visibility: VisibilityState::new(),
			dispatcher: TriggerDispatcher::new(target),
		}
	}

	pub fn config(&self) -> &JumpBarConfig {
		&self.config
	}

	pub fn query(&self) -> &str {
		self.query.text()
	}

	pub fn suggestions(&self) -> &[Suggestion] {
		self.query.suggestions()
	}

	pub fn focused(&self) -> Option<&SuggestionId> {
		self.cursor.focused()
	}

	pub fn focused_index(&self) -> Option<usize> {
		self.cursor.focused_index(self.query.suggestions())
	}

	/// The focused suggestion, if any.
	pub fn focused_suggestion(&self) -> Option<&Suggestion> {
		self.cursor.select(self.query.suggestions())
	}

	pub fn visibility(&self) -> Visibility {
		self.visibility.current()
	}

	pub fn is_shown(&self) -> bool {
		self.visibility.is_shown()
	}

	pub fn generation(&self) -> u64 {
		self.query.generation()
	}

	pub fn subscribe_visibility(&self) -> watch::Receiver<Visibility> {
		self.visibility.subscribe()
	}

	/// Toggles the overlay.
	///
	/// Opening re-issues the current query immediately; the returned transition
	/// carries the focus request for the host's text field.
	pub fn handle_shortcut(&mut self) -> Transition {
		let transition = self.visibility.toggle();
		if transition.opened() {
			self.on_open();
		} else {
			self.on_close();
		}
		transition
	}

	/// Routes a key press.
	///
	/// Text editing keys are [`KeyOutcome::Ignored`]; the host's text field
	/// owns them and reports edits through [`set_query`](Self::set_query).
	pub fn handle_key(&mut self, key: KeyPress) -> KeyOutcome {
		if self.config.shortcut.matches(&key) {
			return KeyOutcome::Toggled(self.handle_shortcut());
		}
		if !self.is_shown() || !key.modifiers.is_empty() {
			return KeyOutcome::Ignored;
		}

		match key.code {
			KeyCode::Up => moved(self.move_up()),
			KeyCode::Down => moved(self.move_down()),
			KeyCode::Enter => self.submit().map_or(KeyOutcome::Handled, KeyOutcome::Triggered),
			KeyCode::Escape if self.config.escape_closes => self.cancel().map_or(KeyOutcome::Handled, KeyOutcome::Closed),
			_ => KeyOutcome::Ignored,
		}
	}

	/// Records new query text. Ignored while hidden.
	///
	/// Returns the generation the request was issued for.
	pub fn set_query(&mut self, text: impl Into<String>) -> Option<u64> {
		if !self.is_shown() {
			tracing::debug!("ignoring query edit while hidden");
			return None;
		}
		Some(self.query.set_query(text))
	}

	pub fn move_up(&mut self) -> bool {
		self.is_shown() && self.cursor.move_up(self.query.suggestions())
	}

	pub fn move_down(&mut self) -> bool {
		self.is_shown() && self.cursor.move_down(self.query.suggestions())
	}

	/// Triggers the focused suggestion.
	///
	/// Returns its identifier, or `None` when hidden or nothing is focused.
	pub fn submit(&mut self) -> Option<SuggestionId> {
		let suggestion = self.focused_suggestion()?.clone();
		self.trigger(&suggestion).then(|| suggestion.id().clone())
	}

	/// Hides the overlay, then dispatches `suggestion`. No-op while hidden.
	pub fn trigger(&mut self, suggestion: &Suggestion) -> bool {
		let triggered = self.dispatcher.trigger(&mut self.visibility, suggestion);
		if triggered {
			self.on_close();
		}
		triggered
	}

	/// Closes the overlay after a click or tap outside it.
	pub fn dismiss(&mut self) -> Option<Transition> {
		self.close(CloseReason::Dismissed)
	}

	/// Closes the overlay without triggering anything.
	pub fn cancel(&mut self) -> Option<Transition> {
		self.close(CloseReason::Cancelled)
	}

	/// Applies every provider result that has already arrived.
	pub fn poll(&mut self) -> Vec<QueryOutcome> {
		let outcomes = self.query.poll();
		if outcomes.iter().any(QueryOutcome::changed_list) {
			self.cursor.reset(self.query.suggestions());
		}
		outcomes
	}

	/// Waits for the next provider result and applies it.
	pub async fn next_update(&mut self) -> Option<QueryOutcome> {
		let outcome = self.query.next_outcome().await?;
		if outcome.changed_list() {
			self.cursor.reset(self.query.suggestions());
		}
		Some(outcome)
	}

	fn close(&mut self, reason: CloseReason) -> Option<Transition> {
		let transition = self.visibility.close(reason)?;
		self.on_close();
		Some(transition)
	}

	fn on_open(&mut self) {
		let generation = self.query.refresh();
		self.cursor.reset(self.query.suggestions());
		tracing::debug!(generation, query = %self.query.text(), "jump bar opened");
	}

	fn on_close(&mut self) {
		self.query.suspend();
		match self.config.reopen {
			ReopenPolicy::Preserve => self.query.invalidate(),
			ReopenPolicy::Clear => {
				self.query.clear();
				self.cursor.clear();
			}
		}
		tracing::debug!(reopen = ?self.config.reopen, "jump bar closed");
	}
}

fn moved(moved: bool) -> KeyOutcome {
	if moved { KeyOutcome::Moved } else { KeyOutcome::Handled }
}
