//! Plain-text rendering of the overlay.

use std::fmt::Write;

use jumpbar::JumpBar;

pub fn render(bar: &JumpBar) -> String {
	let mut out = String::new();
	if !bar.is_shown() {
		let _ = writeln!(out, "[hidden] query: {:?}", bar.query());
		return out;
	}

	let query = if bar.query().is_empty() {
		format!("({})", bar.config().placeholder)
	} else {
		format!("{:?}", bar.query())
	};
	let _ = writeln!(out, "[shown] query: {query}  generation {}", bar.generation());

	if bar.suggestions().is_empty() {
		let _ = writeln!(out, "    no matches");
	}
	let focused = bar.focused_index();
	for (idx, suggestion) in bar.suggestions().iter().enumerate() {
		let marker = if focused == Some(idx) { '>' } else { ' ' };
		let id = suggestion.id();
		let label = suggestion.title().unwrap_or(id.as_str());
		let _ = writeln!(out, "  {marker} {label:<18} {id}");
	}
	out
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use jumpbar::{JumpBarConfig, SuggestionId, SuggestionSource};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::catalog::Catalog;

	fn bar() -> JumpBar {
		JumpBar::new(JumpBarConfig::default(), SuggestionSource::pull(Catalog::new(Duration::ZERO)), |_: &SuggestionId| {}).unwrap()
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn hidden_bar_renders_one_line() {
		assert_eq!(render(&bar()), "[hidden] query: \"\"\n");
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn shown_bar_marks_the_focused_row() {
		let mut bar = bar();
		bar.handle_shortcut();
		bar.set_query("view");
		bar.next_update().await;
		bar.move_down();

		let expected = "\
[shown] query: \"view\"  generation 2
    Tab 2 / View 1     jumpbar://root/tab/2/view/1
  > Tab 2 / View 2     jumpbar://root/tab/2/view/2
    Tab 2 / View 3     jumpbar://root/tab/2/view/3
";
		assert_eq!(render(&bar), expected);
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn empty_query_shows_placeholder() {
		let mut bar = bar();
		bar.handle_shortcut();
		bar.set_query("nothing");
		bar.next_update().await;

		let rendered = render(&bar);
		assert!(rendered.contains("no matches"), "{rendered}");

		bar.set_query("");
		bar.next_update().await;
		assert!(render(&bar).starts_with("[shown] query: (Jump to...)"));
	}
}
