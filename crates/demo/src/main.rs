//! Line-driven host for the jump bar core.
//!
//! Reads commands from stdin, routes them through a [`JumpBar`] over a small
//! catalog of tabs and views, and prints the overlay after each command.
//! Dispatched targets are printed as `open <url>`.

mod catalog;
mod cli;
mod script;
mod view;

use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use jumpbar::{JumpBar, JumpBarConfig, KeyCode, KeyOutcome, KeyPress, SuggestionId, SuggestionSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::catalog::{Catalog, PushCatalog};
use crate::cli::Cli;
use crate::script::{Command, HELP};

/// Extra wait after the debounce and provider latency before rendering.
const SETTLE_MARGIN: Duration = Duration::from_millis(30);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut config = match cli.config_path() {
		Some(path) => JumpBarConfig::load(&path).with_context(|| format!("failed to load {}", path.display()))?,
		None => JumpBarConfig::default(),
	};
	if let Some(ms) = cli.debounce_ms {
		config.debounce_ms = Some(ms);
	}

	let latency = Duration::from_millis(cli.latency_ms);
	let source = if cli.push {
		SuggestionSource::push(PushCatalog::new(latency))
	} else {
		SuggestionSource::pull(Catalog::new(latency))
	};
	let mut bar = JumpBar::new(config, source, |id: &SuggestionId| println!("open {id}"))?;
	info!(shortcut = %bar.config().shortcut, push = cli.push, "jump bar demo ready");
	println!("press `toggle` ({}) to open the jump bar; `help` lists commands", bar.config().shortcut);

	let settle = bar.config().debounce().unwrap_or_default() + latency + SETTLE_MARGIN;
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	while let Some(line) = lines.next_line().await? {
		let command = match script::parse_line(&line) {
			Ok(Some(command)) => command,
			Ok(None) => continue,
			Err(error) => {
				eprintln!("{error}");
				continue;
			}
		};
		if apply(&mut bar, command).is_break() {
			break;
		}
		drain(&mut bar, settle).await;
		print!("{}", view::render(&bar));
	}

	Ok(())
}

fn apply(bar: &mut JumpBar, command: Command) -> ControlFlow<()> {
	let outcome = match command {
		Command::Toggle => {
			let shortcut = bar.config().shortcut;
			bar.handle_key(KeyPress::new(KeyCode::Char(shortcut.key), shortcut.modifiers))
		}
		Command::Type(text) => {
			if bar.set_query(text).is_none() {
				eprintln!("jump bar is hidden");
			}
			return ControlFlow::Continue(());
		}
		Command::Up => bar.handle_key(KeyCode::Up.into()),
		Command::Down => bar.handle_key(KeyCode::Down.into()),
		Command::Enter => bar.handle_key(KeyCode::Enter.into()),
		Command::Escape => bar.handle_key(KeyCode::Escape.into()),
		Command::Dismiss => {
			if bar.dismiss().is_none() {
				eprintln!("jump bar is already hidden");
			}
			return ControlFlow::Continue(());
		}
		Command::Show => return ControlFlow::Continue(()),
		Command::Help => {
			println!("{HELP}");
			return ControlFlow::Continue(());
		}
		Command::Quit => return ControlFlow::Break(()),
	};

	match outcome {
		KeyOutcome::Toggled(transition) if transition.request_focus => debug!("search field focused"),
		KeyOutcome::Ignored => eprintln!("key ignored"),
		outcome => debug!(?outcome, "key handled"),
	}
	ControlFlow::Continue(())
}

/// Applies provider results until none arrive within `settle`.
async fn drain(bar: &mut JumpBar, settle: Duration) {
	while let Ok(Some(outcome)) = tokio::time::timeout(settle, bar.next_update()).await {
		debug!(?outcome, "provider result");
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("jumpbar=trace,jumpbar_demo=debug")
		} else {
			EnvFilter::new("jumpbar=warn,jumpbar_demo=info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
