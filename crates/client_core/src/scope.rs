//! Ties spawned store operations to the lifetime of the view that started
//! them. Dropping the scope aborts whatever is still in flight, so a late
//! response can no longer update state for a view that is gone.

use std::future::Future;

use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ViewScope {
    name: &'static str,
    tasks: Vec<AbortHandle>,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tasks: Vec::new(),
        }
    }

    pub fn spawn<F, T>(&mut self, operation: F) -> ScopedTask<T>
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(operation);
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle.abort_handle());
        ScopedTask { handle }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    pub fn cancel_all(&mut self) {
        let pending = self.in_flight();
        if pending > 0 {
            debug!(scope = self.name, pending, "scope: aborting in-flight operations");
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Result handle for one scoped operation.
pub struct ScopedTask<T> {
    handle: JoinHandle<ClientResult<T>>,
}

impl<T> ScopedTask<T> {
    /// An aborted operation resolves to [`ClientError::Cancelled`].
    pub async fn join(self) -> ClientResult<T> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(ClientError::Cancelled),
            Err(err) => Err(ClientError::Transport(format!("operation panicked: {err}"))),
        }
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
