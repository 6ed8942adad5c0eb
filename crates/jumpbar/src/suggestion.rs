//! Suggestion values handed from providers to the jump bar.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable identity of a suggestion, usually a URL.
///
/// Used for equality, cursor tracking and as the dispatch target.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuggestionId(Arc<str>);

impl SuggestionId {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(Arc::from(id.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SuggestionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for SuggestionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SuggestionId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for SuggestionId {
	fn from(id: String) -> Self {
		Self(Arc::from(id))
	}
}

impl AsRef<str> for SuggestionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Type-erased renderable supplied by a provider.
///
/// The core only clones and compares these by pointer; the rendering surface
/// downcasts to whatever type it agreed on with the provider.
#[derive(Clone)]
pub struct RenderToken(Arc<dyn Any + Send + Sync>);

impl RenderToken {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self(Arc::new(value))
	}

	/// Returns the wrapped value if it is a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.downcast_ref()
	}

	/// Returns true if both tokens point at the same allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for RenderToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("RenderToken(..)")
	}
}

impl PartialEq for RenderToken {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

/// What the rendering surface draws for a suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPayload {
	/// Plain display title.
	Title(String),
	/// Opaque provider-defined renderable.
	Custom(RenderToken),
}

/// One candidate in the jump bar list.
///
/// Equality and hashing consider only [`Suggestion::id`]: two suggestions with
/// the same identifier and different payloads are the same suggestion as far
/// as focus tracking is concerned. Use [`Suggestion::same_snapshot`] to compare
/// payloads too.
#[derive(Debug, Clone)]
pub struct Suggestion {
	id: SuggestionId,
	payload: RenderPayload,
}

impl Suggestion {
	pub fn new(id: impl Into<SuggestionId>, payload: RenderPayload) -> Self {
		Self { id: id.into(), payload }
	}

	/// Creates a suggestion displayed as a plain title.
	pub fn titled(title: impl Into<String>, id: impl Into<SuggestionId>) -> Self {
		Self::new(id, RenderPayload::Title(title.into()))
	}

	/// Creates a suggestion with a custom render payload.
	pub fn custom<T: Any + Send + Sync>(id: impl Into<SuggestionId>, value: T) -> Self {
		Self::new(id, RenderPayload::Custom(RenderToken::new(value)))
	}

	pub fn id(&self) -> &SuggestionId {
		&self.id
	}

	pub fn payload(&self) -> &RenderPayload {
		&self.payload
	}

	/// Returns the display title for [`RenderPayload::Title`] payloads.
	pub fn title(&self) -> Option<&str> {
		match &self.payload {
			RenderPayload::Title(title) => Some(title.as_str()),
			RenderPayload::Custom(_) => None,
		}
	}

	/// Compares identifier and payload.
	pub fn same_snapshot(&self, other: &Self) -> bool {
		self.id == other.id && self.payload == other.payload
	}
}

impl PartialEq for Suggestion {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for Suggestion {}

impl Hash for Suggestion {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

/// Drops suggestions whose identifier already appeared earlier in `list`.
///
/// Focus is tracked by identifier, so a list handed to the cursor must not
/// repeat one.
pub(crate) fn dedup_ids(list: Vec<Suggestion>) -> Vec<Suggestion> {
	let mut seen = HashSet::with_capacity(list.len());
	let before = list.len();
	let unique: Vec<_> = list.into_iter().filter(|s| seen.insert(s.id.clone())).collect();
	if unique.len() != before {
		tracing::trace!(dropped = before - unique.len(), "jumpbar.suggestions.duplicate_ids");
	}
	unique
}

/// Returns true if two lists match element for element, payloads included.
pub(crate) fn same_snapshots(a: &[Suggestion], b: &[Suggestion]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.same_snapshot(b))
}
