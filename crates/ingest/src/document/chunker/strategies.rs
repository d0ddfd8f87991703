//! Strategy interface, strategy selection and the public entry points.

use chunkwise_core::{ChunkError, ChunkStrategy as StrategyKind};
use tracing::debug;

use super::paragraph::ParagraphChunker;
use super::semantic::SemanticChunker;
use super::sentence::SentenceChunker;
use super::types::{Chunk, ChunkingConfig};
use super::word::WordChunker;

/// A boundary-detection strategy.
///
/// Implementations may hold other strategies as delegates for oversized
/// units. Delegation chains must terminate (the built-in chains all end at
/// [`WordChunker`]); nothing in the type system forbids a cycle, so wiring a
/// strategy back into its own delegate chain is a caller error.
pub trait ChunkStrategy: Send + Sync {
    /// Short name used in logs and error context.
    fn name(&self) -> &'static str;

    /// Split `text` into chunks whose positions index into `text`.
    ///
    /// Fails with [`ChunkError::InvalidChunkSize`] before any segmentation
    /// when the configured size is zero. Empty input yields an empty list.
    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError>;
}

/// The closed set of built-in strategies.
pub enum Chunker {
    /// Internal leaf; not selectable through configuration.
    Word(WordChunker),
    Sentence(SentenceChunker),
    Paragraph(ParagraphChunker),
    Semantic(SemanticChunker),
}

impl Chunker {
    /// Map a configured strategy to its chunker with the default delegate chain.
    pub fn for_strategy(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Sentence => Chunker::Sentence(SentenceChunker::new()),
            StrategyKind::Paragraph => Chunker::Paragraph(ParagraphChunker::new()),
            StrategyKind::Semantic => Chunker::Semantic(SemanticChunker::new()),
        }
    }

    fn inner(&self) -> &dyn ChunkStrategy {
        match self {
            Chunker::Word(c) => c,
            Chunker::Sentence(c) => c,
            Chunker::Paragraph(c) => c,
            Chunker::Semantic(c) => c,
        }
    }
}

impl ChunkStrategy for Chunker {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
        self.inner().chunk(text, config)
    }
}

/// Chunk `text` with the strategy named in `config`.
pub fn chunk(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
    config.validate()?;
    let chunker = Chunker::for_strategy(config.strategy());
    debug!(
        strategy = chunker.name(),
        content_type = %config.content_type(),
        bytes = text.len(),
        chunk_size = config.chunk_size(),
        "Chunking text"
    );
    chunker.chunk(text, config)
}

/// Chunk `text` and stamp every chunk with `source`.
pub fn chunk_with_source(
    text: &str,
    config: &ChunkingConfig,
    source: &str,
) -> Result<Vec<Chunk>, ChunkError> {
    Ok(chunk(text, config)?
        .into_iter()
        .map(|c| c.with_source(source))
        .collect())
}
