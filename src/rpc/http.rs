//! JSON-RPC over HTTP.
//!
//! Each flush posts the whole queue as one JSON-RPC 2.0 batch:
//!
//! ```text
//! [{"jsonrpc":"2.0","id":0,"method":"core.get_session_state","params":[]}, ...]
//! ```
//!
//! Replies are matched to calls by id; a call with no matching reply fails.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ShellError};

use super::{settle, CallBatcher, PendingCall};

/// Batches calls and sends them to the daemon's JSON-RPC endpoint.
pub struct HttpBatcher {
    client: Client,
    url: String,
    queue: RefCell<Vec<PendingCall>>,
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: usize,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct ReplyObject {
    #[serde(default)]
    id: Option<usize>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplyBody {
    Batch(Vec<ReplyObject>),
    Single(ReplyObject),
}

impl HttpBatcher {
    /// Create a batcher for the given endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nullsh/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            queue: RefCell::new(Vec::new()),
        })
    }

    /// The endpoint calls are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn send(&self, calls: &[PendingCall]) -> Result<HashMap<usize, ReplyObject>> {
        let batch: Vec<Request<'_>> = calls
            .iter()
            .enumerate()
            .map(|(id, call)| Request {
                jsonrpc: "2.0",
                id,
                method: call.method(),
                params: call.params(),
            })
            .collect();

        let response = self.client.post(&self.url).json(&batch).send()?;
        if !response.status().is_success() {
            return Err(ShellError::Transport {
                message: format!("HTTP {} from {}", response.status(), self.url),
            });
        }

        match response.json::<ReplyBody>()? {
            ReplyBody::Batch(replies) => Ok(replies
                .into_iter()
                .filter_map(|reply| reply.id.map(|id| (id, reply)))
                .collect()),
            ReplyBody::Single(reply) => match (reply.id, reply.error) {
                (Some(id), error) => Ok(HashMap::from([(
                    id,
                    ReplyObject {
                        id: Some(id),
                        result: reply.result,
                        error,
                    },
                )])),
                (None, Some(error)) => Err(ShellError::Rpc {
                    method: "batch".to_string(),
                    message: format!("{} (code {})", error.message, error.code),
                }),
                (None, None) => Err(ShellError::Transport {
                    message: "reply carries no id".to_string(),
                }),
            },
        }
    }
}

impl CallBatcher for HttpBatcher {
    fn enqueue(&self, call: PendingCall) {
        tracing::debug!("Queued {}", call.method());
        self.queue.borrow_mut().push(call);
    }

    fn flush(&self) -> Result<()> {
        let calls = self.queue.take();
        if calls.is_empty() {
            return Ok(());
        }

        tracing::debug!("Flushing {} call(s) to {}", calls.len(), self.url);
        let mut replies = self.send(&calls)?;

        settle(calls, |index, _| match replies.remove(&index) {
            Some(ReplyObject {
                error: Some(error), ..
            }) => Err(error.message),
            Some(reply) => Ok(reply.result.unwrap_or(Value::Null)),
            None => Err("no reply from daemon".to_string()),
        })
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
