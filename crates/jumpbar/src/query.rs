//! Query session controller with debounce and stale-result discard.
//!
//! Every query change starts a new generation. Requests run on Tokio tasks and
//! report back over a channel tagged with the generation they were issued for;
//! a result is applied only if its generation is still current when the owner
//! drains it, so an older request finishing late never overwrites a newer
//! query's list.
//!
//! A debounce delay, when configured, holds each request back until input
//! pauses. Each new query cancels the previous timer if it has not fired yet.
//! Requests already handed to the provider are never cancelled; their results
//! are dropped by the generation check instead.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::error::{JumpBarError, ProviderError};
use crate::provider::{SuggestionSource, forward_pushed};
use crate::suggestion::{Suggestion, dedup_ids};
use crate::task::{TaskKind, TaskSpawner};

/// Message sent back from query and forwarder tasks.
#[derive(Debug)]
pub(crate) enum QueryEvent {
	/// A provider request finished.
	Completed {
		generation: u64,
		query: String,
		result: Result<Option<Vec<Suggestion>>, ProviderError>,
	},
	/// A push provider published a changed list.
	Pushed(Vec<Suggestion>),
}

/// What applying one provider event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
	/// A pull result for the current generation replaced the list.
	Applied { generation: u64 },
	/// A push provider published a new list.
	Pushed,
	/// A push provider accepted the query; its list arrives as [`Self::Pushed`].
	Acknowledged { generation: u64 },
	/// The result belonged to a superseded generation and was dropped.
	Stale { generation: u64, current: u64 },
	/// The provider call failed; the list is unchanged.
	Failed { generation: u64 },
	/// A pushed list arrived while the session was suspended and was dropped.
	Suspended,
}

impl QueryOutcome {
	/// Returns true if the suggestion list was replaced.
	pub fn changed_list(&self) -> bool {
		matches!(self, Self::Applied { .. } | Self::Pushed)
	}
}

/// Owns the query text and the authoritative suggestion list.
pub struct QuerySession {
	text: String,
	generation: u64,
	applied_generation: u64,
	suggestions: Vec<Suggestion>,
	debounce: Option<Duration>,
	source: SuggestionSource,
	spawner: TaskSpawner,
	/// Debounce timer of the most recent request, if it may still be waiting.
	pending: Option<CancellationToken>,
	/// Pushed lists are dropped while set; [`Self::refresh`] clears it.
	suspended: bool,
	/// Push provider's published list, for resyncing on refresh.
	published: Option<watch::Receiver<Vec<Suggestion>>>,
	forwarder: Option<JoinHandle<()>>,
	events_tx: mpsc::UnboundedSender<QueryEvent>,
	events_rx: mpsc::UnboundedReceiver<QueryEvent>,
}

impl std::fmt::Debug for QuerySession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QuerySession")
			.field("text", &self.text)
			.field("generation", &self.generation)
			.field("suggestions", &self.suggestions.len())
			.field("debounce", &self.debounce)
			.field("source", &self.source)
			.finish()
	}
}

impl QuerySession {
	/// Creates a session whose tasks run on the current Tokio runtime.
	pub fn new(source: SuggestionSource, debounce: Option<Duration>) -> Result<Self, JumpBarError> {
		Ok(Self::with_spawner(source, debounce, TaskSpawner::current()?))
	}

	/// Creates a session whose tasks run on `handle`.
	pub fn with_handle(source: SuggestionSource, debounce: Option<Duration>, handle: Handle) -> Self {
		Self::with_spawner(source, debounce, TaskSpawner::new(handle))
	}

	pub(crate) fn with_spawner(source: SuggestionSource, debounce: Option<Duration>, spawner: TaskSpawner) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		let published = source.subscribe();
		let forwarder = published
			.clone()
			.map(|rx| spawner.spawn(TaskKind::PushForward, forward_pushed(rx, events_tx.clone())));

		Self {
			text: String::new(),
			generation: 0,
			applied_generation: 0,
			suggestions: Vec::new(),
			debounce: debounce.filter(|delay| !delay.is_zero()),
			source,
			spawner,
			pending: None,
			suspended: false,
			published,
			forwarder,
			events_tx,
			events_rx,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Current generation. Starts at 0 and only grows.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Generation of the last pull result that replaced the list.
	pub fn applied_generation(&self) -> u64 {
		self.applied_generation
	}

	pub fn suggestions(&self) -> &[Suggestion] {
		&self.suggestions
	}

	pub fn debounce(&self) -> Option<Duration> {
		self.debounce
	}

	/// Records new query text and schedules a request for it.
	///
	/// Returns the generation the request was issued for.
	pub fn set_query(&mut self, text: impl Into<String>) -> u64 {
		self.text = text.into();
		self.bump_generation();
		self.schedule(self.debounce);
		self.generation
	}

	/// Re-issues the current text immediately, skipping the debounce delay.
	///
	/// Resumes a suspended session. Push sessions also resync the list from the
	/// provider's published state.
	pub fn refresh(&mut self) -> u64 {
		self.suspended = false;
		self.bump_generation();
		if let Some(published) = &self.published {
			self.suggestions = dedup_ids(published.borrow().clone());
		}
		self.schedule(None);
		self.generation
	}

	/// Cancels a waiting debounce timer and orphans in-flight requests.
	pub fn invalidate(&mut self) {
		self.cancel_pending();
		self.bump_generation();
		trace!(generation = self.generation, "jumpbar.query.invalidate");
	}

	/// Stops applying pushed lists until the next [`Self::refresh`].
	///
	/// Pull results are already discarded by [`Self::invalidate`]; this covers
	/// push providers, whose lists carry no generation.
	pub fn suspend(&mut self) {
		self.suspended = true;
	}

	pub fn is_suspended(&self) -> bool {
		self.suspended
	}

	/// Invalidates outstanding work and empties text and list.
	pub fn clear(&mut self) {
		self.invalidate();
		self.text.clear();
		self.suggestions.clear();
	}

	/// Applies every result that has already arrived, without waiting.
	pub fn poll(&mut self) -> Vec<QueryOutcome> {
		let mut outcomes = Vec::new();
		while let Ok(event) = self.events_rx.try_recv() {
			outcomes.push(self.apply(event));
		}
		outcomes
	}

	/// Waits for the next result and applies it.
	///
	/// The session holds its own sender, so this only returns `None` if the
	/// channel was closed from the receiving side; with nothing outstanding it
	/// waits indefinitely.
	pub async fn next_outcome(&mut self) -> Option<QueryOutcome> {
		let event = self.events_rx.recv().await?;
		Some(self.apply(event))
	}

	pub(crate) fn apply(&mut self, event: QueryEvent) -> QueryOutcome {
		match event {
			QueryEvent::Pushed(_) if self.suspended => {
				trace!("jumpbar.push.suspended");
				QueryOutcome::Suspended
			}
			QueryEvent::Pushed(list) => {
				debug!(len = list.len(), "applying pushed suggestions");
				self.suggestions = dedup_ids(list);
				QueryOutcome::Pushed
			}
			QueryEvent::Completed {
				generation,
				query,
				result,
			} => {
				let current = self.generation;
				let is_current = generation == current;
				match result {
					Err(error) => {
						warn!(generation, current, query = %query, error = %error, "suggestion provider failed");
						if is_current {
							QueryOutcome::Failed { generation }
						} else {
							QueryOutcome::Stale { generation, current }
						}
					}
					Ok(_) if !is_current => {
						trace!(generation, current, "jumpbar.query.stale");
						QueryOutcome::Stale { generation, current }
					}
					Ok(Some(list)) => {
						debug!(generation, query = %query, len = list.len(), "applying suggestions");
						self.suggestions = dedup_ids(list);
						self.applied_generation = generation;
						QueryOutcome::Applied { generation }
					}
					Ok(None) => QueryOutcome::Acknowledged { generation },
				}
			}
		}
	}

	fn bump_generation(&mut self) {
		self.generation = self.generation.wrapping_add(1);
	}

	fn cancel_pending(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.cancel();
		}
	}

	fn schedule(&mut self, delay: Option<Duration>) {
		self.cancel_pending();

		let cancel = CancellationToken::new();
		self.pending = Some(cancel.clone());

		let generation = self.generation;
		let query = self.text.clone();
		let source = self.source.clone();
		let spawner = self.spawner.clone();
		let tx = self.events_tx.clone();

		self.spawner.spawn(TaskKind::Query, async move {
			if let Some(delay) = delay {
				tokio::select! {
					_ = cancel.cancelled() => {
						trace!(generation, "jumpbar.query.debounced");
						return;
					}
					_ = sleep(delay) => {}
				}
			} else if cancel.is_cancelled() {
				return;
			}

			debug!(generation, query = %query, "issuing suggestion query");

			// Provider panics surface here as a JoinError.
			let call = {
				let query = query.clone();
				spawner.spawn(TaskKind::Query, async move { source.issue(&query).await })
			};
			let result = match call.await {
				Ok(result) => result,
				Err(join_error) => Err(ProviderError::Aborted(join_error.to_string())),
			};

			let _ = tx.send(QueryEvent::Completed { generation, query, result });
		});
	}
}

impl Drop for QuerySession {
	fn drop(&mut self) {
		self.cancel_pending();
		if let Some(forwarder) = self.forwarder.take() {
			forwarder.abort();
		}
	}
}
