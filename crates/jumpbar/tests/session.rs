//! End-to-end jump bar sessions driven through the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use jumpbar::{
	FnProvider, JumpBar, JumpBarConfig, KeyCode, KeyOutcome, KeyPress, Modifiers, ProviderError, PushSuggestionProvider, QueryOutcome,
	Suggestion, SuggestionFeed, SuggestionId, SuggestionSource, Visibility,
};
use pretty_assertions::assert_eq;
use tokio::sync::watch;
use tokio::time::sleep;

fn catalog() -> Vec<Suggestion> {
	vec![
		Suggestion::titled("Tab 1", "jumpbar://root/tab/1"),
		Suggestion::titled("Tab 2", "jumpbar://root/tab/2"),
		Suggestion::titled("Tab 2 / View 1", "jumpbar://root/tab/2/view/1"),
		Suggestion::titled("Tab 2 / View 2", "jumpbar://root/tab/2/view/2"),
		Suggestion::titled("Tab 2 / View 3", "jumpbar://root/tab/2/view/3"),
	]
}

fn matching(entries: &[Suggestion], query: &str) -> Vec<Suggestion> {
	let needle = query.to_lowercase();
	entries
		.iter()
		.filter(|s| s.title().is_some_and(|title| title.to_lowercase().contains(&needle)))
		.cloned()
		.collect()
}

fn titles(bar: &JumpBar) -> Vec<&str> {
	bar.suggestions().iter().filter_map(Suggestion::title).collect()
}

type Dispatched = Arc<Mutex<Vec<String>>>;

fn recorder() -> (Dispatched, impl Fn(&SuggestionId) + Send + Sync + 'static) {
	let dispatched = Dispatched::default();
	let sink = Arc::clone(&dispatched);
	(dispatched, move |id: &SuggestionId| sink.lock().unwrap().push(id.to_string()))
}

fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keyboard_session_over_catalog() {
	init_tracing();
	let config = JumpBarConfig::from_toml_str(
		r#"
		shortcut = "ctrl+k"
		debounce_ms = 150
		"#,
	)
	.unwrap();
	let entries = catalog();
	let provider = FnProvider::new(move |query: &str| matching(&entries, query));
	let (dispatched, target) = recorder();
	let mut bar = JumpBar::new(config, SuggestionSource::pull(provider), target).unwrap();

	let KeyOutcome::Toggled(transition) = bar.handle_key(KeyPress::new(KeyCode::Char('K'), Modifiers::CTRL)) else {
		panic!("ctrl+k should open the jump bar");
	};
	assert!(transition.request_focus);
	bar.next_update().await;
	assert_eq!(titles(&bar).len(), 5);
	assert_eq!(bar.focused().map(SuggestionId::as_str), Some("jumpbar://root/tab/1"));

	bar.set_query("t");
	bar.set_query("tab 2 /");
	bar.set_query("tab 2 / view");
	let outcome = bar.next_update().await;
	assert_eq!(outcome, Some(QueryOutcome::Applied { generation: 4 }));
	assert_eq!(titles(&bar), vec!["Tab 2 / View 1", "Tab 2 / View 2", "Tab 2 / View 3"]);

	assert_eq!(bar.handle_key(KeyCode::Down.into()), KeyOutcome::Moved);
	assert_eq!(
		bar.handle_key(KeyCode::Enter.into()),
		KeyOutcome::Triggered(SuggestionId::new("jumpbar://root/tab/2/view/2"))
	);
	assert_eq!(*dispatched.lock().unwrap(), vec!["jumpbar://root/tab/2/view/2".to_string()]);
	assert_eq!(bar.visibility(), Visibility::Hidden);
	assert_eq!(bar.query(), "tab 2 / view");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn visibility_subscribers_follow_the_session() {
	init_tracing();
	let entries = catalog();
	let provider = FnProvider::new(move |query: &str| matching(&entries, query));
	let (dispatched, target) = recorder();
	let mut bar = JumpBar::new(JumpBarConfig::default(), SuggestionSource::pull(provider), target).unwrap();
	let mut rx = bar.subscribe_visibility();

	bar.handle_shortcut();
	assert_eq!(*rx.borrow_and_update(), Visibility::Shown);
	bar.next_update().await;

	let first = bar.suggestions()[0].clone();
	assert!(bar.trigger(&first));
	assert!(rx.has_changed().unwrap());
	assert_eq!(*rx.borrow_and_update(), Visibility::Hidden);
	assert_eq!(*dispatched.lock().unwrap(), vec!["jumpbar://root/tab/1".to_string()]);
}

/// Push provider whose entries can be renamed behind the session's back.
struct LiveCatalog {
	entries: Mutex<Vec<Suggestion>>,
	query: Mutex<String>,
	feed: SuggestionFeed,
}

impl LiveCatalog {
	fn new(entries: Vec<Suggestion>) -> Arc<Self> {
		Arc::new(Self {
			feed: SuggestionFeed::new(entries.clone()),
			entries: Mutex::new(entries),
			query: Mutex::new(String::new()),
		})
	}

	fn republish(&self) {
		let query = self.query.lock().unwrap().clone();
		let list = matching(&self.entries.lock().unwrap(), &query);
		self.feed.publish(list);
	}

	fn rename(&self, id: &str, title: &str) {
		for entry in self.entries.lock().unwrap().iter_mut() {
			if entry.id().as_str() == id {
				*entry = Suggestion::titled(title, id);
			}
		}
		self.republish();
	}
}

#[async_trait]
impl PushSuggestionProvider for LiveCatalog {
	fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
		self.feed.subscribe()
	}

	async fn update(&self, query: &str) -> Result<(), ProviderError> {
		*self.query.lock().unwrap() = query.to_string();
		self.republish();
		Ok(())
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn pushed_renames_keep_focus() {
	init_tracing();
	let live = LiveCatalog::new(catalog());
	let (_, target) = recorder();
	let mut bar = JumpBar::new(JumpBarConfig::default(), SuggestionSource::Push(live.clone()), target).unwrap();

	bar.handle_shortcut();
	bar.set_query("tab 2");
	sleep(Duration::from_millis(1)).await;
	bar.poll();
	assert_eq!(titles(&bar).len(), 4);
	bar.move_down();
	assert_eq!(bar.focused().map(SuggestionId::as_str), Some("jumpbar://root/tab/2/view/1"));

	live.rename("jumpbar://root/tab/2/view/1", "Tab 2 / View 1 (pinned)");
	sleep(Duration::from_millis(1)).await;
	assert_eq!(bar.poll(), vec![QueryOutcome::Pushed]);
	assert_eq!(titles(&bar)[1], "Tab 2 / View 1 (pinned)");
	assert_eq!(bar.focused_index(), Some(1));
}
