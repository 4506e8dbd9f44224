use std::iter::FusedIterator;

/// Paragraph separator
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Start byte index in original text
    pub start: usize,

    /// End byte index in original text
    pub end: usize,

    /// Character count of the contained paragraphs, separators excluded
    pub char_len: usize,

    /// Number of paragraphs in the chunk
    pub paragraphs: usize,
}

/// Split text into chunks of whole paragraphs
///
/// Paragraphs are accumulated while their combined character count stays
/// within `max_length`. A paragraph longer than `max_length` on its own
/// becomes a single oversized chunk; it is never split.
pub fn chunk_paragraphs(text: &str, max_length: usize) -> ParagraphChunks<'_> {
    ParagraphChunks {
        text,
        max_length,
        cursor: if text.is_empty() { None } else { Some(0) },
        pending: None,
    }
}

/// Iterator returned by [`chunk_paragraphs`]
#[derive(Debug, Clone)]
pub struct ParagraphChunks<'a> {
    text: &'a str,
    max_length: usize,
    cursor: Option<usize>,
    pending: Option<(usize, usize)>,
}

impl<'a> ParagraphChunks<'a> {
    /// Byte range of the next paragraph
    fn next_paragraph(&mut self) -> Option<(usize, usize)> {
        let cursor = self.cursor?;
        match self.text[cursor..].find(PARAGRAPH_SEPARATOR) {
            Some(idx) => {
                self.cursor = Some(cursor + idx + PARAGRAPH_SEPARATOR.len());
                Some((cursor, cursor + idx))
            }
            None => {
                self.cursor = None;
                Some((cursor, self.text.len()))
            }
        }
    }

    fn char_len(&self, (start, end): (usize, usize)) -> usize {
        self.text[start..end].chars().count()
    }
}

impl<'a> Iterator for ParagraphChunks<'a> {
    type Item = TextChunk;

    fn next(&mut self) -> Option<TextChunk> {
        let first = match self.pending.take() {
            Some(range) => range,
            None => self.next_paragraph()?,
        };

        let start = first.0;
        let mut end = first.1;
        let mut char_len = self.char_len(first);
        let mut paragraphs = 1;

        while let Some(range) = self.next_paragraph() {
            let len = self.char_len(range);
            if char_len + len > self.max_length {
                self.pending = Some(range);
                break;
            }
            char_len += len;
            end = range.1;
            paragraphs += 1;
        }

        Some(TextChunk {
            text: self.text[start..end].to_string(),
            start,
            end,
            char_len,
            paragraphs,
        })
    }
}

impl<'a> FusedIterator for ParagraphChunks<'a> {}
