//! Remote calls to the torrent daemon.
//!
//! Commands never wait on the daemon directly. They [`enqueue`] calls, each
//! optionally carrying a callback for its reply, and the shell calls
//! [`flush`] once per loop iteration. Flushing blocks until every queued
//! call has been answered and runs the callbacks in enqueue order.
//!
//! - [`HttpBatcher`] sends each flush as one JSON-RPC 2.0 batch over HTTP
//! - [`MockDaemon`] answers from canned replies, for tests
//!
//! [`enqueue`]: CallBatcher::enqueue
//! [`flush`]: CallBatcher::flush

pub mod http;
pub mod mock;

pub use http::HttpBatcher;
pub use mock::MockDaemon;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ShellError};

/// Callback run with a call's result once the batch is flushed.
pub type Callback = Box<dyn FnOnce(Value) -> Result<()>>;

/// What the daemon answered for one call.
pub type Reply = std::result::Result<Value, String>;

/// A remote call waiting for the next flush.
pub struct PendingCall {
    method: String,
    params: Vec<Value>,
    callback: Option<Callback>,
}

impl PendingCall {
    /// A call whose result is ignored (errors still fail the flush).
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            callback: None,
        }
    }

    /// Attach a callback receiving the call's result.
    pub fn on_reply(mut self, callback: impl FnOnce(Value) -> Result<()> + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The remote method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The positional parameters.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn resolve(self, reply: Reply) -> Result<()> {
        match reply {
            Ok(value) => match self.callback {
                Some(callback) => callback(value),
                None => Ok(()),
            },
            Err(message) => Err(ShellError::Rpc {
                method: self.method,
                message,
            }),
        }
    }
}

impl std::fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall")
            .field("method", &self.method)
            .field("params", &self.params)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Queue of remote calls with a synchronous flush.
///
/// Implementations use interior mutability: commands only ever hold a
/// shared reference.
pub trait CallBatcher {
    /// Queue a call for the next flush. Never blocks.
    fn enqueue(&self, call: PendingCall);

    /// Send every queued call and run the callbacks.
    ///
    /// The queue is empty afterwards whether or not the flush succeeded.
    /// Returns the first failure; later ones are logged.
    fn flush(&self) -> Result<()>;

    /// Number of calls waiting for the next flush.
    fn pending(&self) -> usize;
}

/// Deliver replies to a drained batch, in enqueue order.
///
/// `reply_for` receives each call's index within the batch.
pub(crate) fn settle(
    calls: Vec<PendingCall>,
    mut reply_for: impl FnMut(usize, &PendingCall) -> Reply,
) -> Result<()> {
    let mut first_error = None;
    for (index, call) in calls.into_iter().enumerate() {
        let reply = reply_for(index, &call);
        if let Err(err) = call.resolve(reply) {
            if first_error.is_none() {
                first_error = Some(err);
            } else {
                tracing::warn!("Additional call failure: {}", err);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Resolve torrent ids against the daemon's session.
///
/// An empty filter returns every id the daemon knows about, in the order
/// it reports them. Otherwise only the requested ids the daemon knows are
/// returned; unknown ids are dropped.
pub fn match_torrents(daemon: &dyn CallBatcher, ids: &[String]) -> Result<Vec<String>> {
    let matched = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&matched);
    let wanted: HashSet<String> = ids.iter().cloned().collect();

    daemon.enqueue(
        PendingCall::new("core.get_session_state", Vec::new()).on_reply(move |value| {
            let known: Vec<String> = decode("core.get_session_state", value)?;
            let mut sink = sink.borrow_mut();
            if wanted.is_empty() {
                sink.extend(known);
            } else {
                sink.extend(known.into_iter().filter(|id| wanted.contains(id)));
            }
            Ok(())
        }),
    );
    daemon.flush()?;

    let result = matched.take();
    Ok(result)
}

/// Make one call, flush, and decode its result.
///
/// A synchronous facade for commands that need an answer before they can
/// continue.
pub fn fetch<T: DeserializeOwned + 'static>(
    daemon: &dyn CallBatcher,
    method: &str,
    params: Vec<Value>,
) -> Result<T> {
    let slot: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    let name = method.to_string();

    daemon.enqueue(PendingCall::new(method, params).on_reply(move |value| {
        *sink.borrow_mut() = Some(decode(&name, value)?);
        Ok(())
    }));
    daemon.flush()?;

    let value = slot.take();
    value.ok_or_else(|| ShellError::Rpc {
        method: method.to_string(),
        message: "no reply from daemon".to_string(),
    })
}

/// Decode a call result into a typed value.
pub fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ShellError::Rpc {
        method: method.to_string(),
        message: format!("unexpected reply: {}", e),
    })
}
