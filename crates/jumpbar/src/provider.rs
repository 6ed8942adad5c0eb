//! Suggestion provider contracts and the adapter the session drives.
//!
//! Two provider shapes are supported:
//!
//! - [`SuggestionProvider`] is pulled: the session asks for suggestions for a
//!   query and applies the answer if no newer query superseded it.
//! - [`PushSuggestionProvider`] owns its list. The session tells it about
//!   query changes and watches the list it publishes. Ordering is whatever the
//!   provider guarantees; the session applies every distinct list it sees and
//!   cannot detect staleness.
//!
//! [`SuggestionSource`] wraps either one behind a single `issue(query)`
//! capability.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::error::ProviderError;
use crate::query::QueryEvent;
use crate::suggestion::{Suggestion, same_snapshots};

/// Pull-model provider: answers one query at a time.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
	/// Returns suggestions for `query`, in display order.
	async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError>;
}

/// Push-model provider: owns a suggestion list and republishes it on its own
/// schedule.
#[async_trait]
pub trait PushSuggestionProvider: Send + Sync {
	/// Subscribes to the provider's published list.
	fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>>;

	/// Notifies the provider that the query changed.
	async fn update(&self, query: &str) -> Result<(), ProviderError>;
}

/// Closure-backed pull provider for synchronous filters.
pub struct FnProvider<F> {
	f: F,
}

impl<F> FnProvider<F> {
	pub fn new(f: F) -> Self {
		Self { f }
	}
}

#[async_trait]
impl<F> SuggestionProvider for FnProvider<F>
where
	F: Fn(&str) -> Vec<Suggestion> + Send + Sync,
{
	async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
		Ok((self.f)(query))
	}
}

/// Published list for push providers to embed.
#[derive(Debug)]
pub struct SuggestionFeed {
	tx: watch::Sender<Vec<Suggestion>>,
}

impl Default for SuggestionFeed {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl SuggestionFeed {
	pub fn new(initial: Vec<Suggestion>) -> Self {
		let (tx, _) = watch::channel(initial);
		Self { tx }
	}

	/// Replaces the published list and notifies subscribers.
	pub fn publish(&self, suggestions: Vec<Suggestion>) {
		self.tx.send_replace(suggestions);
	}

	pub fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
		self.tx.subscribe()
	}
}

/// Either provider shape, as driven by the query session.
#[derive(Clone)]
pub enum SuggestionSource {
	Pull(Arc<dyn SuggestionProvider>),
	Push(Arc<dyn PushSuggestionProvider>),
}

impl std::fmt::Debug for SuggestionSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Pull(_) => f.write_str("SuggestionSource::Pull"),
			Self::Push(_) => f.write_str("SuggestionSource::Push"),
		}
	}
}

impl SuggestionSource {
	pub fn pull(provider: impl SuggestionProvider + 'static) -> Self {
		Self::Pull(Arc::new(provider))
	}

	pub fn push(provider: impl PushSuggestionProvider + 'static) -> Self {
		Self::Push(Arc::new(provider))
	}

	pub fn is_push(&self) -> bool {
		matches!(self, Self::Push(_))
	}

	/// Issues one query.
	///
	/// Pull providers answer with `Some(list)`. Push providers are only
	/// notified and answer `None`; their list arrives through
	/// [`forward_pushed`].
	pub(crate) async fn issue(&self, query: &str) -> Result<Option<Vec<Suggestion>>, ProviderError> {
		match self {
			Self::Pull(provider) => provider.suggestions(query).await.map(Some),
			Self::Push(provider) => provider.update(query).await.map(|()| None),
		}
	}

	pub(crate) fn subscribe(&self) -> Option<watch::Receiver<Vec<Suggestion>>> {
		match self {
			Self::Pull(_) => None,
			Self::Push(provider) => Some(provider.subscribe()),
		}
	}
}

/// Forwards a push provider's list changes to the session.
///
/// Each published list is compared against the last forwarded one and only
/// real changes (membership, order or payload) are sent. A non-empty initial
/// list is forwarded immediately. Ends when either side goes away.
pub(crate) async fn forward_pushed(mut rx: watch::Receiver<Vec<Suggestion>>, tx: mpsc::UnboundedSender<QueryEvent>) {
	let mut last = rx.borrow_and_update().clone();
	if !last.is_empty() && tx.send(QueryEvent::Pushed(last.clone())).is_err() {
		return;
	}

	while rx.changed().await.is_ok() {
		let next = rx.borrow_and_update().clone();
		if same_snapshots(&last, &next) {
			tracing::trace!(len = next.len(), "jumpbar.push.unchanged");
			continue;
		}
		last = next.clone();
		if tx.send(QueryEvent::Pushed(next)).is_err() {
			break;
		}
	}
	tracing::trace!("jumpbar.push.closed");
}
