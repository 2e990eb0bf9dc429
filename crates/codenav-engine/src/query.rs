//! Blocking handles for possibly-background semantic queries.
//!
//! The semantic model may compute answers on background threads (symbol lookup can
//! require compilation). [`QueryHandle`] bridges that to the synchronous navigation
//! pipeline: the orchestrator blocks on the handle in short `recv_timeout` slices,
//! checking the request's [`CancelToken`] between slices so a newly issued command or
//! host shutdown can abort an in-flight resolution.

use crate::cancel::CancelToken;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors produced while waiting on a semantic query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The request's cancellation token was signaled.
    Cancelled,
    /// The provider dropped the query without producing a result.
    Disconnected,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Cancelled => write!(f, "Semantic query cancelled"),
            QueryError::Disconnected => {
                write!(f, "Semantic query provider disconnected without a result")
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// A handle to the eventual result of one semantic query.
#[derive(Debug)]
pub struct QueryHandle<T> {
    rx: mpsc::Receiver<T>,
}

impl<T: Send + 'static> QueryHandle<T> {
    /// A handle that is already resolved with `value`.
    ///
    /// Providers answering from in-memory state use this to skip thread plumbing.
    pub fn ready(value: T) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(value);
        Self { rx }
    }

    /// Run `query` on a background thread and resolve the handle with its result.
    pub fn spawn<F>(query: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(query());
        });
        Self { rx }
    }

    /// Block until the query resolves, the token is cancelled, or the provider goes
    /// away.
    pub fn wait(self, cancel: &CancelToken) -> Result<T, QueryError> {
        loop {
            if cancel.is_cancelled() {
                return Err(QueryError::Cancelled);
            }
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(value) => return Ok(value),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(QueryError::Disconnected),
            }
        }
    }
}
