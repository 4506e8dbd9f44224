use async_trait::async_trait;
use reqwest::Client;
use scenescribe_common::{AppConfig, Result, ScenescribeError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, trace};

use crate::types::{ChatRequest, RawResponse};

/// Sends one chat request and returns the raw HTTP exchange
///
/// Network and body-read failures are errors; any HTTP status, including
/// non-success ones, is returned as a [`RawResponse`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport with bearer-token authorization
#[derive(Clone)]
pub struct HttpTransport {
    api_url: String,
    api_key: String,
    client: Client,
}

impl HttpTransport {
    /// Create transport from configuration
    ///
    /// No request timeout is set unless the configuration asks for one.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Chat client initialized: {}", config.api_url);
        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<RawResponse> {
        debug!("Sending request to {}", self.api_url);
        trace!(payload = ?request, "Request payload");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ScenescribeError::transport(format!("Failed to send request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ScenescribeError::transport(format!("Failed to read response body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

/// Outcome replayed by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Answer with this status and body
    Respond(RawResponse),
    /// Fail at the transport level with this message
    Fail(String),
}

impl ScriptedReply {
    /// 200 response carrying `content` as the first completion
    pub fn completion(content: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        Self::Respond(RawResponse::new(200, body.to_string()))
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Respond(RawResponse::new(status, body))
    }
}

/// Transport that replays canned replies, for tests and dry runs
///
/// Replies are consumed in order; the last one repeats once the script is
/// exhausted.
#[derive(Debug)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    last: Mutex<Option<ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests sent so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request sent so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self) -> Option<ScriptedReply> {
        let mut replies = self.replies.lock().ok()?;
        let mut last = self.last.lock().ok()?;
        if let Some(reply) = replies.pop_front() {
            *last = Some(reply);
        }
        last.clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.next_reply() {
            Some(ScriptedReply::Respond(response)) => Ok(response),
            Some(ScriptedReply::Fail(message)) => Err(ScenescribeError::transport(message)),
            None => Err(ScenescribeError::transport("No scripted reply")),
        }
    }
}
