//! Trigger dispatch: hide the overlay, then hand the identifier to the host.

use std::sync::Arc;

use crate::suggestion::{Suggestion, SuggestionId};
use crate::visibility::{CloseReason, VisibilityState};

/// Receives the identifier of a triggered suggestion.
///
/// Fire-and-forget: the jump bar neither waits for nor retries dispatch.
pub trait DispatchTarget: Send + Sync {
	fn open(&self, target: &SuggestionId);
}

impl<F> DispatchTarget for F
where
	F: Fn(&SuggestionId) + Send + Sync,
{
	fn open(&self, target: &SuggestionId) {
		self(target)
	}
}

#[derive(Clone)]
pub struct TriggerDispatcher {
	target: Arc<dyn DispatchTarget>,
}

impl std::fmt::Debug for TriggerDispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TriggerDispatcher").finish_non_exhaustive()
	}
}

impl TriggerDispatcher {
	pub fn new(target: impl DispatchTarget + 'static) -> Self {
		Self { target: Arc::new(target) }
	}

	/// Closes the overlay, then dispatches `suggestion`'s identifier.
	///
	/// Does nothing while hidden. Returns true if dispatch happened.
	pub fn trigger(&self, visibility: &mut VisibilityState, suggestion: &Suggestion) -> bool {
		if visibility.close(CloseReason::Triggered).is_none() {
			tracing::debug!(target = %suggestion.id(), "ignoring trigger while hidden");
			return false;
		}
		tracing::debug!(target = %suggestion.id(), "dispatching suggestion");
		self.target.open(suggestion.id());
		true
	}
}
