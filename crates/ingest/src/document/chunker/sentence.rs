//! Sentence chunker.

use std::sync::Arc;

use chunkwise_core::constants::SENTENCE_SEPARATOR;
use chunkwise_core::ChunkError;
use tracing::debug;

use super::helpers::Packer;
use super::segment::{segment, SegmentUnit};
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig};
use super::word::WordChunker;

/// Packs whole sentences; a sentence over budget is split by the word delegate.
#[derive(Clone)]
pub struct SentenceChunker {
    words: Arc<dyn ChunkStrategy>,
}

impl SentenceChunker {
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(WordChunker))
    }

    /// Use `words` for oversized sentences and sentence-free input.
    pub fn with_fallback(words: Arc<dyn ChunkStrategy>) -> Self {
        Self { words }
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStrategy for SentenceChunker {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;
        debug!("Sentence chunking {} bytes", text.len());

        let mut sentences = segment(text, SegmentUnit::Sentence).peekable();
        if sentences.peek().is_none() {
            return self
                .words
                .chunk(text, config)
                .map_err(|e| e.in_strategy("sentence->word"));
        }

        let mut packer = Packer::new(config, SENTENCE_SEPARATOR);
        for sentence in sentences {
            if sentence.char_len() > config.chunk_size() {
                debug!(
                    start = sentence.range.start,
                    chars = sentence.char_len(),
                    "Oversized sentence, delegating to {}",
                    self.words.name()
                );
                let sub = self
                    .words
                    .chunk(&sentence.text, config)
                    .map_err(|e| e.in_strategy("sentence->word"))?;
                packer.splice(sub, sentence.range.start);
                continue;
            }
            packer.push(sentence);
        }
        Ok(packer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwise_core::{ChunkStrategy as StrategyKind, ContentType};

    fn config(size: usize, overlap: f64) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap, StrategyKind::Sentence, ContentType::Prose)
    }

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    struct FailingStrategy;

    impl ChunkStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn chunk(&self, _text: &str, _config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
            Err(ChunkError::external("segmenter unavailable"))
        }
    }

    #[test]
    fn groups_whole_sentences() {
        let text = "First sentence. Second sentence. Third sentence.";
        let chunks = SentenceChunker::new().chunk(text, &config(30, 0.0)).unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["First sentence.", "Second sentence.", "Third sentence."]
        );
        assert_eq!(chunks[1].span(), 16..32);
    }

    #[test]
    fn packs_several_short_sentences() {
        let text = "One. Two. Three. Four.";
        let chunks = SentenceChunker::new().chunk(text, &config(10, 0.0)).unwrap();
        assert_eq!(texts(&chunks), vec!["One. Two.", "Three.", "Four."]);
    }

    #[test]
    fn oversized_sentence_is_split_by_words_and_rebased() {
        let text = "Short one. This sentence is far too long to fit. End.";
        let chunks = SentenceChunker::new().chunk(text, &config(20, 0.0)).unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["Short one.", "This sentence is far", "too long to fit.", "End."]
        );
        let chars: Vec<char> = text.chars().collect();
        for chunk in &chunks {
            let source: String = chars[chunk.span()].iter().collect();
            assert_eq!(source, chunk.text, "span must point at the chunk text");
        }
        let indices: Vec<usize> = chunks.iter().map(|c| c.metadata.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn overlap_carries_whole_sentences() {
        // overlap_size = 12: "Bravo two." (10) fits, two sentences do not.
        let text = "Alpha one. Bravo two. Charlie three.";
        let chunks = SentenceChunker::new().chunk(text, &config(25, 0.5)).unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["Alpha one. Bravo two.", "Bravo two. Charlie three."]
        );
        assert!(chunks[1].metadata.has_overlap_with_previous);
        assert!(chunks[0].metadata.has_overlap_with_next);
    }

    #[test]
    fn delegate_failure_is_wrapped_once() {
        let chunker = SentenceChunker::with_fallback(Arc::new(FailingStrategy));
        let long = "A very long sentence that certainly exceeds the budget.";
        let err = chunker.chunk(long, &config(10, 0.0)).unwrap_err();
        match err {
            ChunkError::ChunkingFailed { strategy, source } => {
                assert_eq!(strategy, "sentence->word");
                assert_eq!(source.to_string(), "segmenter unavailable");
            }
            other => panic!("expected ChunkingFailed, got {other:?}"),
        }
    }

    #[test]
    fn zero_size_is_rejected_before_work() {
        let chunker = SentenceChunker::with_fallback(Arc::new(FailingStrategy));
        let err = chunker.chunk("", &config(0, 0.0)).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidChunkSize(0)));
    }
}
