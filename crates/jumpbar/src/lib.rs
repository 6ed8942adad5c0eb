//! Jump bar overlay core.
//!
//! A jump bar is a command-palette style overlay: a search field and a live
//! suggestion list drawn over application content, toggled by a keyboard
//! shortcut, that dispatches a target identifier when a suggestion is chosen.
//!
//! This crate owns the state machine behind that overlay and nothing else.
//! Rendering, text-field focus handling and routing of the dispatched
//! identifier belong to the host.
//!
//! # Components
//!
//! - [`QuerySession`]: owns the query text, debounces requests to the
//!   suggestion provider, and discards results that a newer query superseded.
//! - [`SelectionCursor`]: tracks the focused suggestion by identifier and
//!   re-derives a valid focus whenever the list changes shape.
//! - [`VisibilityState`]: the `Hidden`/`Shown` machine driven by the shortcut,
//!   dismissal, cancel and trigger.
//! - [`TriggerDispatcher`]: hides the overlay, then hands the identifier to the
//!   host's [`DispatchTarget`].
//!
//! [`JumpBar`] composes all four and is the type hosts usually hold.
//!
//! # Providers
//!
//! Suggestions come from either a pull provider ([`SuggestionProvider`],
//! queried on demand) or a push provider ([`PushSuggestionProvider`], which
//! owns its list and publishes changes). Both are wrapped by
//! [`SuggestionSource`] so the session drives them the same way.
//!
//! # Threading
//!
//! Session state is owned by a single logical thread. Provider calls and
//! debounce timers run as Tokio tasks; their results travel back over a
//! channel and are applied by [`JumpBar::poll`] or [`JumpBar::next_update`]
//! on the owning thread.

pub mod bar;
pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod key;
pub mod provider;
pub mod query;
pub mod suggestion;
pub mod visibility;

mod task;
#[cfg(test)]
mod test_support;
#[cfg(test)]
use tracing_subscriber as _;

pub use bar::{JumpBar, KeyOutcome};
pub use config::{JumpBarConfig, ReopenPolicy};
pub use cursor::SelectionCursor;
pub use dispatch::{DispatchTarget, TriggerDispatcher};
pub use error::{ConfigError, JumpBarError, ProviderError};
pub use key::{KeyCode, KeyPress, Modifiers, Shortcut};
pub use provider::{FnProvider, PushSuggestionProvider, SuggestionFeed, SuggestionProvider, SuggestionSource};
pub use query::{QueryOutcome, QuerySession};
pub use suggestion::{RenderPayload, RenderToken, Suggestion, SuggestionId};
pub use visibility::{CloseReason, Transition, Visibility, VisibilityState};
