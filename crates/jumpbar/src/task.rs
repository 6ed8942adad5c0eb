use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::JumpBarError;

/// What a spawned jump bar task does, for trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskKind {
	/// Debounce timer followed by one provider request.
	Query,
	/// Forwards a push provider's published list to the session.
	PushForward,
}

impl TaskKind {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Query => "query",
			Self::PushForward => "push_forward",
		}
	}
}

/// Runtime that session tasks are spawned on.
#[derive(Debug, Clone)]
pub(crate) struct TaskSpawner {
	handle: Handle,
}

impl TaskSpawner {
	pub(crate) fn new(handle: Handle) -> Self {
		Self { handle }
	}

	/// Captures the runtime the caller is running in.
	pub(crate) fn current() -> Result<Self, JumpBarError> {
		Handle::try_current().map(Self::new).map_err(|_| JumpBarError::NoRuntime)
	}

	pub(crate) fn spawn<F>(&self, kind: TaskKind, fut: F) -> JoinHandle<F::Output>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		tracing::trace!(task = kind.as_str(), "jumpbar.spawn");
		self.handle.spawn(fut)
	}
}
