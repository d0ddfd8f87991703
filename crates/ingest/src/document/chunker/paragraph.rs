//! Paragraph chunker.

use std::sync::Arc;

use chunkwise_core::constants::PARAGRAPH_SEPARATOR;
use chunkwise_core::ChunkError;
use tracing::debug;

use super::helpers::Packer;
use super::segment::{segment, SegmentUnit};
use super::sentence::SentenceChunker;
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig};

/// Packs whole paragraphs joined by a blank line.
///
/// Oversized paragraphs go to the sentence delegate; text without any
/// paragraph goes there whole.
#[derive(Clone)]
pub struct ParagraphChunker {
    sentences: Arc<dyn ChunkStrategy>,
}

impl ParagraphChunker {
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(SentenceChunker::new()))
    }

    pub fn with_fallback(sentences: Arc<dyn ChunkStrategy>) -> Self {
        Self { sentences }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStrategy for ParagraphChunker {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;
        debug!("Paragraph chunking {} bytes", text.len());

        let mut paragraphs = segment(text, SegmentUnit::Paragraph).peekable();
        if paragraphs.peek().is_none() {
            return self
                .sentences
                .chunk(text, config)
                .map_err(|e| e.in_strategy("paragraph->sentence"));
        }

        let mut packer = Packer::new(config, PARAGRAPH_SEPARATOR);
        for paragraph in paragraphs {
            if paragraph.char_len() > config.chunk_size() {
                debug!(
                    start = paragraph.range.start,
                    chars = paragraph.char_len(),
                    "Oversized paragraph, delegating to {}",
                    self.sentences.name()
                );
                let sub = self
                    .sentences
                    .chunk(&paragraph.text, config)
                    .map_err(|e| e.in_strategy("paragraph->sentence"))?;
                packer.splice(sub, paragraph.range.start);
                continue;
            }
            packer.push(paragraph);
        }
        Ok(packer.finish())
    }
}
