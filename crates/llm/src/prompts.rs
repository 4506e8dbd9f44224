//! Prompt templates for scene extraction

use crate::types::ChatMessage;

/// System framing for every scene request
pub const SYSTEM_PROMPT: &str = "You are a movie expert analyzing scripts.";

/// Instructions prepended to the transcript before chunking
pub fn scene_prompt(movie_title: &str) -> String {
    format!(
        r#"Analyze this script of the movie {title} and identify key scenes.
Choose time ranges that are most essential to the plot and development of the movie's story.
Each chosen range should be between 10-30 seconds.
Format the output as a JSON object: {{"120-145": "PLOT SUMMARY", "280-300": "PLOT SUMMARY"}}
Each summary should be 3 sentences describing the scene's events.
The first summary should start with: "Here we go, let's go over the movie {title}."
Make sure to cover the whole movie's plot arc.
"#,
        title = movie_title
    )
}

/// User message wrapping one chunk
pub fn chunk_prompt(chunk: &str) -> String {
    format!(
        r#"Process this movie script.
Extract key scenes with their timestamps and provide brief summaries.
Format: {{"timestamp": "summary"}}
Keep summaries concise but informative.
Content:
{}"#,
        chunk
    )
}

/// Two-message conversation for one chunk
pub fn scene_messages(chunk: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(chunk_prompt(chunk)),
    ]
}
