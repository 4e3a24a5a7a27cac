//! In-memory daemon for tests.
//!
//! # Example
//!
//! ```
//! use nullsh::rpc::{match_torrents, MockDaemon};
//! use serde_json::json;
//!
//! let daemon = MockDaemon::new();
//! daemon.respond("core.get_session_state", json!(["abc", "def"]));
//!
//! let ids = match_torrents(&daemon, &[]).unwrap();
//! assert_eq!(ids, vec!["abc".to_string(), "def".to_string()]);
//! assert_eq!(daemon.methods_called(), vec!["core.get_session_state"]);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Result, ShellError};

use super::{settle, CallBatcher, PendingCall, Reply};

/// A call as the daemon saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// Daemon double answering from canned replies.
///
/// Methods without a configured reply answer `null`.
#[derive(Debug, Default)]
pub struct MockDaemon {
    replies: RefCell<HashMap<String, Reply>>,
    queue: RefCell<Vec<PendingCall>>,
    calls: RefCell<Vec<RecordedCall>>,
    flushes: Cell<usize>,
    transport_failure: RefCell<Option<String>>,
}

impl MockDaemon {
    /// Create a daemon with no canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `method` with `result`.
    pub fn respond(&self, method: &str, result: Value) {
        self.replies
            .borrow_mut()
            .insert(method.to_string(), Ok(result));
    }

    /// Answer every call to `method` with an error.
    pub fn fail(&self, method: &str, message: &str) {
        self.replies
            .borrow_mut()
            .insert(method.to_string(), Err(message.to_string()));
    }

    /// Make the next non-empty flush fail as if the daemon were unreachable.
    pub fn fail_next_flush(&self, message: &str) {
        *self.transport_failure.borrow_mut() = Some(message.to_string());
    }

    /// Every call delivered to the daemon, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Method names of every delivered call, in order.
    pub fn methods_called(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.method.clone()).collect()
    }

    /// Parameters of every delivered call to `method`.
    pub fn params_for(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.params.clone())
            .collect()
    }

    /// How many times `flush` was called, including empty flushes.
    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }
}

impl CallBatcher for MockDaemon {
    fn enqueue(&self, call: PendingCall) {
        self.queue.borrow_mut().push(call);
    }

    fn flush(&self) -> Result<()> {
        self.flushes.set(self.flushes.get() + 1);

        let calls = self.queue.take();
        if calls.is_empty() {
            return Ok(());
        }

        if let Some(message) = self.transport_failure.borrow_mut().take() {
            return Err(ShellError::Transport { message });
        }

        self.calls
            .borrow_mut()
            .extend(calls.iter().map(|call| RecordedCall {
                method: call.method().to_string(),
                params: call.params().to_vec(),
            }));

        let replies = self.replies.borrow().clone();
        settle(calls, |_, call| {
            replies
                .get(call.method())
                .cloned()
                .unwrap_or(Ok(Value::Null))
        })
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
