//! Scripted providers for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::ProviderError;
use crate::provider::{PushSuggestionProvider, SuggestionFeed, SuggestionProvider};
use crate::suggestion::Suggestion;

/// Titled suggestions whose ids are the lowercased titles.
pub(crate) fn list(titles: &[&str]) -> Vec<Suggestion> {
	titles
		.iter()
		.map(|title| Suggestion::titled(*title, title.to_lowercase()))
		.collect()
}

pub(crate) fn ids(list: &[Suggestion]) -> Vec<&str> {
	list.iter().map(|s| s.id().as_str()).collect()
}

fn filter(catalog: &[Suggestion], query: &str) -> Vec<Suggestion> {
	let needle = query.to_lowercase();
	catalog
		.iter()
		.filter(|s| s.title().is_some_and(|title| title.to_lowercase().contains(&needle)))
		.cloned()
		.collect()
}

pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

pub(crate) fn calls(log: &CallLog) -> Vec<String> {
	log.lock().unwrap().clone()
}

/// Pull provider filtering a fixed catalog.
///
/// `"boom"` fails, `"panic"` panics, and per-query delays can be scripted.
pub(crate) struct ScriptedProvider {
	catalog: Vec<Suggestion>,
	delays: HashMap<String, Duration>,
	calls: CallLog,
}

impl ScriptedProvider {
	pub(crate) fn new(catalog: Vec<Suggestion>) -> Self {
		Self {
			catalog,
			delays: HashMap::new(),
			calls: CallLog::default(),
		}
	}

	pub(crate) fn with_delay(mut self, query: &str, delay: Duration) -> Self {
		self.delays.insert(query.to_string(), delay);
		self
	}

	pub(crate) fn call_log(&self) -> CallLog {
		Arc::clone(&self.calls)
	}
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
	async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
		self.calls.lock().unwrap().push(query.to_string());
		if let Some(delay) = self.delays.get(query) {
			tokio::time::sleep(*delay).await;
		}
		match query {
			"boom" => Err(ProviderError::Failed("boom".into())),
			"panic" => panic!("scripted provider panic"),
			_ => Ok(filter(&self.catalog, query)),
		}
	}
}

/// Push provider that republishes a filtered catalog on every update.
///
/// Tests keep a clone of [`Self::feed`] to publish arbitrary lists.
pub(crate) struct FilteringFeed {
	catalog: Vec<Suggestion>,
	feed: Arc<SuggestionFeed>,
	updates: CallLog,
}

impl FilteringFeed {
	pub(crate) fn new(catalog: Vec<Suggestion>) -> Self {
		let feed = Arc::new(SuggestionFeed::new(catalog.clone()));
		Self {
			catalog,
			feed,
			updates: CallLog::default(),
		}
	}

	pub(crate) fn feed(&self) -> Arc<SuggestionFeed> {
		Arc::clone(&self.feed)
	}

	pub(crate) fn update_log(&self) -> CallLog {
		Arc::clone(&self.updates)
	}
}

#[async_trait]
impl PushSuggestionProvider for FilteringFeed {
	fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
		self.feed.subscribe()
	}

	async fn update(&self, query: &str) -> Result<(), ProviderError> {
		self.updates.lock().unwrap().push(query.to_string());
		self.feed.publish(filter(&self.catalog, query));
		Ok(())
	}
}
