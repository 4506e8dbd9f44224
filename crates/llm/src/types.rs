use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "deepseek-r1-distill-llama-70b")
    pub model: String,

    /// Conversation so far
    pub messages: Vec<ChatMessage>,
}

/// Chat completion response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Status and body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One extracted scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Time range label as produced by the model (e.g. "120-145")
    pub time_range: String,

    /// Plot summary for the range
    pub summary: String,
}

/// Scenes keyed by time range, in the order the model listed them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneMap {
    pub scenes: Vec<Scene>,
}

impl SceneMap {
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Summary for a time range label
    pub fn get(&self, time_range: &str) -> Option<&str> {
        self.scenes
            .iter()
            .find(|s| s.time_range == time_range)
            .map(|s| s.summary.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Print the scene listing
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nProcessed Scene Summaries:")?;
        writeln!(out, "------------------------")?;
        for scene in &self.scenes {
            writeln!(out, "\nTime Range: {}", scene.time_range)?;
            writeln!(out, "Summary: {}", scene.summary)?;
            writeln!(out, "------------------------")?;
        }
        Ok(())
    }
}
