use scenescribe_common::{Result, ScenescribeError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chunking::chunk_paragraphs;
use crate::client::ChatClient;
use crate::parse::parse_scene_map;
use crate::prompts::{scene_messages, scene_prompt};
use crate::transport::ChatTransport;
use crate::types::SceneMap;

/// Characters of the chunk echoed to the debug log
const PREVIEW_CHARS: usize = 200;

/// Scene extraction for a single transcript
///
/// Only the first chunk of the prompted transcript is sent; later chunks are
/// counted and logged but not processed.
pub struct SceneExtractor<T> {
    client: ChatClient<T>,
    max_chunk_length: usize,
}

impl<T: ChatTransport> SceneExtractor<T> {
    /// Create new extractor
    pub fn new(client: ChatClient<T>, max_chunk_length: usize) -> Self {
        Self {
            client,
            max_chunk_length,
        }
    }

    pub fn client(&self) -> &ChatClient<T> {
        &self.client
    }

    /// Extract scenes for `movie_title` from its transcript
    pub async fn extract(
        &self,
        movie_title: &str,
        transcript: &str,
        cancel: &CancellationToken,
    ) -> Result<SceneMap> {
        let script = format!("{}{}", scene_prompt(movie_title), transcript);
        info!(
            "Starting scene extraction for {} - Script length: {} chars",
            movie_title,
            script.chars().count()
        );

        let mut chunks = chunk_paragraphs(&script, self.max_chunk_length);
        let first = chunks
            .next()
            .ok_or_else(|| ScenescribeError::invalid_input("No chunks to process"))?;

        let skipped = chunks.count();
        if skipped > 0 {
            warn!("Processing only the first chunk; {} later chunk(s) skipped", skipped);
        }

        info!("Processing first chunk ({} chars)", first.char_len);
        debug!(
            "Chunk content: {}...",
            first.text.chars().take(PREVIEW_CHARS).collect::<String>()
        );

        let content = self.client.query(&scene_messages(&first.text), cancel).await?;
        info!("Successfully processed first chunk");
        debug!("Final processed response: {}", content);

        parse_scene_map(&content)
    }
}
