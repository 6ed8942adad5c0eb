//! Overlay visibility state machine.
//!
//! Two states, `Hidden` (initial) and `Shown`. The shortcut toggles between
//! them; dismissal, cancel and a successful trigger close the overlay. The
//! current state is published on a watch channel so the rendering surface can
//! follow it without polling the session.

use tokio::sync::watch;

/// Whether the overlay is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
	#[default]
	Hidden,
	Shown,
}

impl Visibility {
	pub fn is_shown(self) -> bool {
		self == Self::Shown
	}

	fn toggled(self) -> Self {
		match self {
			Self::Hidden => Self::Shown,
			Self::Shown => Self::Hidden,
		}
	}
}

/// Why the overlay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
	/// The toggle shortcut was pressed while shown.
	Toggled,
	/// Click or tap outside the overlay.
	Dismissed,
	/// A suggestion was triggered.
	Triggered,
	/// Escape or an explicit cancel call.
	Cancelled,
}

/// A completed visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
	pub from: Visibility,
	pub to: Visibility,
	/// Set when the overlay opened; the host should focus its text input.
	pub request_focus: bool,
	/// Set when the overlay closed.
	pub reason: Option<CloseReason>,
}

impl Transition {
	pub fn opened(&self) -> bool {
		self.to.is_shown()
	}
}

#[derive(Debug)]
pub struct VisibilityState {
	tx: watch::Sender<Visibility>,
}

impl Default for VisibilityState {
	fn default() -> Self {
		Self::new()
	}
}

impl VisibilityState {
	pub fn new() -> Self {
		let (tx, _) = watch::channel(Visibility::Hidden);
		Self { tx }
	}

	pub fn current(&self) -> Visibility {
		*self.tx.borrow()
	}

	pub fn is_shown(&self) -> bool {
		self.current().is_shown()
	}

	/// Subscribes to visibility changes.
	pub fn subscribe(&self) -> watch::Receiver<Visibility> {
		self.tx.subscribe()
	}

	/// Handles the toggle shortcut.
	pub fn toggle(&mut self) -> Transition {
		let from = self.current();
		let to = from.toggled();
		self.set(to);
		Transition {
			from,
			to,
			request_focus: to.is_shown(),
			reason: (!to.is_shown()).then_some(CloseReason::Toggled),
		}
	}

	/// Closes the overlay. Returns `None` if it was already hidden.
	pub fn close(&mut self, reason: CloseReason) -> Option<Transition> {
		if !self.is_shown() {
			return None;
		}
		self.set(Visibility::Hidden);
		Some(Transition {
			from: Visibility::Shown,
			to: Visibility::Hidden,
			request_focus: false,
			reason: Some(reason),
		})
	}

	fn set(&mut self, to: Visibility) {
		tracing::debug!(visibility = ?to, "jump bar visibility changed");
		self.tx.send_replace(to);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_hidden() {
		let state = VisibilityState::new();
		assert_eq!(state.current(), Visibility::Hidden);
	}

	#[test]
	fn toggle_opens_with_focus_request_and_closes() {
		let mut state = VisibilityState::new();

		let open = state.toggle();
		assert_eq!(open.to, Visibility::Shown);
		assert!(open.request_focus);
		assert_eq!(open.reason, None);

		let close = state.toggle();
		assert_eq!(close.from, Visibility::Shown);
		assert_eq!(close.to, Visibility::Hidden);
		assert!(!close.request_focus);
		assert_eq!(close.reason, Some(CloseReason::Toggled));
	}

	#[test]
	fn close_is_a_no_op_when_hidden() {
		let mut state = VisibilityState::new();
		assert_eq!(state.close(CloseReason::Dismissed), None);

		state.toggle();
		let transition = state.close(CloseReason::Dismissed).unwrap();
		assert_eq!(transition.reason, Some(CloseReason::Dismissed));
		assert_eq!(state.close(CloseReason::Cancelled), None);
	}

	#[test]
	fn subscribers_observe_changes() {
		let mut state = VisibilityState::new();
		let mut rx = state.subscribe();
		assert!(!rx.has_changed().unwrap());

		state.toggle();
		assert!(rx.has_changed().unwrap());
		assert_eq!(*rx.borrow_and_update(), Visibility::Shown);

		state.close(CloseReason::Triggered);
		assert_eq!(*rx.borrow_and_update(), Visibility::Hidden);
	}
}
