//! SceneScribe LLM Integration
//!
//! Chat-completions client, transcript chunking and scene map parsing

mod chunking;
mod client;
mod parse;
mod prompts;
mod reasoning;
mod scenes;
mod transport;
mod types;

pub use chunking::{chunk_paragraphs, ParagraphChunks, TextChunk, PARAGRAPH_SEPARATOR};
pub use client::{extract_content, ChatClient, RetryPolicy};
pub use parse::parse_scene_map;
pub use prompts::{chunk_prompt, scene_messages, scene_prompt, SYSTEM_PROMPT};
pub use reasoning::strip_reasoning;
pub use scenes::SceneExtractor;
pub use transport::{ChatTransport, HttpTransport, ScriptedReply, ScriptedTransport};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, RawResponse, ResponseMessage, Role, Scene, SceneMap,
};
