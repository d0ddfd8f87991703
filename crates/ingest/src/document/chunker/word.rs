//! Word chunker: the leaf every delegation chain ends at.

use chunkwise_core::constants::WORD_SEPARATOR;
use chunkwise_core::ChunkError;
use tracing::debug;

use super::helpers::Packer;
use super::segment::{segment, SegmentUnit};
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig};

/// Packs words up to the budget with word-level overlap.
///
/// A word longer than `chunk_size` becomes a chunk of its own; words are
/// never cut.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordChunker;

impl ChunkStrategy for WordChunker {
    fn name(&self) -> &'static str {
        "word"
    }

    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;
        debug!("Word chunking {} bytes", text.len());

        let mut packer = Packer::new(config, WORD_SEPARATOR);
        for word in segment(text, SegmentUnit::Word) {
            packer.push(word);
        }
        Ok(packer.finish())
    }
}
