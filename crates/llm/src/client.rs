use scenescribe_common::{AppConfig, Result, ScenescribeError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use crate::reasoning::strip_reasoning;
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Fixed count-and-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_retries: u32,

    /// Wait between attempts
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }
}

/// Chat-completions client with bounded retry
#[derive(Debug)]
pub struct ChatClient<T> {
    transport: T,
    model: String,
    policy: RetryPolicy,
}

impl ChatClient<HttpTransport> {
    /// Create HTTP client from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            HttpTransport::new(config)?,
            config.model.clone(),
            RetryPolicy::from_config(config),
        ))
    }
}

impl<T: ChatTransport> ChatClient<T> {
    pub fn new(transport: T, model: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            model: model.into(),
            policy,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the conversation and return the answer text
    ///
    /// Non-200 statuses and transport failures are retried with the same
    /// payload after a fixed delay until `max_retries` attempts have been
    /// made. A response without the expected completion structure fails
    /// immediately. The request and the wait between attempts both abort
    /// with [`ScenescribeError::Cancelled`] once `cancel` fires.
    pub async fn query(&self, messages: &[ChatMessage], cancel: &CancellationToken) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
        };
        let max_retries = self.policy.max_retries;
        if max_retries == 0 {
            return Err(ScenescribeError::transport("No attempts allowed by retry policy"));
        }

        debug!(
            "Sending chat request - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let mut attempt = 1;
        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ScenescribeError::Cancelled),
                outcome = self.try_query(&request) => outcome,
            };

            match outcome {
                Ok(content) => {
                    debug!("Received answer on attempt {} - Length: {}", attempt, content.len());
                    return Ok(content);
                }
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    warn!(
                        "Chat request failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, max_retries, e, self.policy.retry_delay
                    );
                    wait(self.policy.retry_delay, cancel).await?;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Chat request failed (attempt {}/{}): {}", attempt, max_retries, e);
                    return Err(e);
                }
            }
        }
    }

    /// Single attempt
    async fn try_query(&self, request: &ChatRequest) -> Result<String> {
        let response = self.transport.send(request).await?;
        debug!("Raw API response status: {}", response.status);

        if response.status != 200 {
            warn!("API error: status {} - {}", response.status, response.body);
            return Err(ScenescribeError::request_failed(response.status, response.body));
        }
        trace!("Full response body: {}", response.body);

        let content = extract_content(&response.body)?;
        trace!("Raw content: {}", content);

        let cleaned = strip_reasoning(&content);
        if cleaned.len() != content.len() {
            debug!("Removed reasoning block - {} chars remain", cleaned.len());
        }
        Ok(cleaned.to_string())
    }
}

/// Content of the first completion in a response body
///
/// A body that is not JSON counts as a transport failure; JSON without
/// `choices[0].message.content` is a malformed response.
pub fn extract_content(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ScenescribeError::transport(format!("Failed to parse response: {}", e)))?;

    let response: ChatResponse = serde_json::from_value(value)
        .map_err(|e| ScenescribeError::malformed_response(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ScenescribeError::malformed_response("No completion content in response"))
}

/// Sleep for `delay` unless cancelled first
async fn wait(delay: Duration, cancel: &CancellationToken) -> Result<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScenescribeError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}
