//! Demo suggestion catalog: two tabs, the second with three views.

use std::time::Duration;

use async_trait::async_trait;
use jumpbar::{ProviderError, PushSuggestionProvider, Suggestion, SuggestionFeed, SuggestionProvider};
use tokio::sync::watch;

pub fn entries() -> Vec<Suggestion> {
	let mut entries = vec![
		Suggestion::titled("Tab 1", "jumpbar://root/tab/1"),
		Suggestion::titled("Tab 2", "jumpbar://root/tab/2"),
	];
	entries.extend((1..=3).map(|view| Suggestion::titled(format!("Tab 2 / View {view}"), format!("jumpbar://root/tab/2/view/{view}"))));
	entries
}

/// Case-insensitive substring match on titles, in catalog order.
pub fn filter(entries: &[Suggestion], query: &str) -> Vec<Suggestion> {
	let needle = query.trim().to_lowercase();
	entries
		.iter()
		.filter(|s| s.title().is_some_and(|title| title.to_lowercase().contains(&needle)))
		.cloned()
		.collect()
}

/// Pull provider over [`entries`].
pub struct Catalog {
	entries: Vec<Suggestion>,
	latency: Duration,
}

impl Catalog {
	pub fn new(latency: Duration) -> Self {
		Self {
			entries: entries(),
			latency,
		}
	}
}

#[async_trait]
impl SuggestionProvider for Catalog {
	async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
		Ok(filter(&self.entries, query))
	}
}

/// Push provider over [`entries`]; republishes the filtered list per query.
pub struct PushCatalog {
	entries: Vec<Suggestion>,
	latency: Duration,
	feed: SuggestionFeed,
}

impl PushCatalog {
	pub fn new(latency: Duration) -> Self {
		let entries = entries();
		Self {
			feed: SuggestionFeed::new(entries.clone()),
			entries,
			latency,
		}
	}
}

#[async_trait]
impl PushSuggestionProvider for PushCatalog {
	fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
		self.feed.subscribe()
	}

	async fn update(&self, query: &str) -> Result<(), ProviderError> {
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
		self.feed.publish(filter(&self.entries, query));
		tracing::debug!(query, "push catalog republished");
		Ok(())
	}
}
