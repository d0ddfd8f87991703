//! Content-aware chunking.
//!
//! Routes on the configured content type: prose to paragraphs, code to
//! logical blocks, markdown to header sections, and mixed content to
//! fence-delimited segments fed back through this chunker.

use std::sync::Arc;

use chunkwise_core::{ChunkError, ContentType};
use tracing::debug;

use super::code::chunk_code;
use super::markdown::chunk_markdown;
use super::mixed::chunk_mixed;
use super::paragraph::ParagraphChunker;
use super::sentence::SentenceChunker;
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig};

#[derive(Clone)]
pub struct SemanticChunker {
    paragraphs: Arc<dyn ChunkStrategy>,
    sentences: Arc<dyn ChunkStrategy>,
}

impl SemanticChunker {
    pub fn new() -> Self {
        let sentences: Arc<dyn ChunkStrategy> = Arc::new(SentenceChunker::new());
        let paragraphs = Arc::new(ParagraphChunker::with_fallback(sentences.clone()));
        Self::with_delegates(paragraphs, sentences)
    }

    /// `paragraphs` handles prose; `sentences` handles oversized markdown sections.
    pub fn with_delegates(
        paragraphs: Arc<dyn ChunkStrategy>,
        sentences: Arc<dyn ChunkStrategy>,
    ) -> Self {
        Self {
            paragraphs,
            sentences,
        }
    }
}

impl Default for SemanticChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStrategy for SemanticChunker {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            content_type = %config.content_type(),
            "Semantic chunking {} bytes",
            text.len()
        );

        match config.content_type() {
            ContentType::Prose => self
                .paragraphs
                .chunk(text, config)
                .map_err(|e| e.in_strategy("semantic->paragraph")),
            ContentType::Code => Ok(chunk_code(text, config)),
            ContentType::Markdown => chunk_markdown(text, config, self.sentences.as_ref()),
            ContentType::Mixed => chunk_mixed(text, config, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwise_core::ChunkStrategy as StrategyKind;

    fn config(size: usize, overlap: f64, content_type: ContentType) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap, StrategyKind::Semantic, content_type)
    }

    struct FailingStrategy;

    impl ChunkStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn chunk(&self, _text: &str, _config: &ChunkingConfig) -> Result<Vec<Chunk>, ChunkError> {
            Err(ChunkError::external("no tokenizer"))
        }
    }

    #[test]
    fn prose_routes_to_paragraphs() {
        let text = "Para one.\n\nPara two.";
        let chunks = SemanticChunker::new()
            .chunk(text, &config(12, 0.0, ContentType::Prose))
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "Para two.");
        assert_eq!(chunks[1].metadata.content_type, ContentType::Prose);
    }

    #[test]
    fn code_routes_to_blocks() {
        let text = "a();\nb();\n\nc();";
        let chunks = SemanticChunker::new()
            .chunk(text, &config(10, 0.0, ContentType::Code))
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a();\nb();");
        assert!(chunks
            .iter()
            .all(|c| c.metadata.content_type == ContentType::Code));
    }

    #[test]
    fn mixed_tags_each_segment() {
        let text = "Some intro prose.\n\n```\nlet x = 1;\nlet y = 2;\n```\n\nSome closing prose.";
        let chunks = SemanticChunker::new()
            .chunk(text, &config(200, 0.0, ContentType::Mixed))
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].metadata.content_type, ContentType::Prose);
        assert_eq!(chunks[1].metadata.content_type, ContentType::Code);
        assert_eq!(chunks[1].text, "let x = 1;\nlet y = 2;");
        assert_eq!(chunks[2].metadata.content_type, ContentType::Prose);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.index, i);
            assert!(!chunk.text.contains("```"));
        }
        let chars: Vec<char> = text.chars().collect();
        let code: String = chars[chunks[1].span()].iter().collect();
        assert_eq!(code, chunks[1].text);
    }

    #[test]
    fn prose_delegate_failure_is_tagged() {
        let failing: Arc<dyn ChunkStrategy> = Arc::new(FailingStrategy);
        let chunker = SemanticChunker::with_delegates(failing.clone(), failing);
        let err = chunker
            .chunk("Some prose.", &config(50, 0.0, ContentType::Prose))
            .unwrap_err();
        assert!(matches!(
            err,
            ChunkError::ChunkingFailed { strategy: "semantic->paragraph", .. }
        ));
    }

    #[test]
    fn mixed_failure_is_wrapped_at_the_innermost_path() {
        let failing: Arc<dyn ChunkStrategy> = Arc::new(FailingStrategy);
        let chunker = SemanticChunker::with_delegates(failing.clone(), failing);
        let err = chunker
            .chunk("Prose only.", &config(50, 0.0, ContentType::Mixed))
            .unwrap_err();
        match err {
            ChunkError::ChunkingFailed { strategy, .. } => {
                assert_eq!(strategy, "semantic->paragraph");
            }
            other => panic!("expected ChunkingFailed, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_is_empty_for_every_content_type() {
        for content_type in [
            ContentType::Prose,
            ContentType::Code,
            ContentType::Markdown,
            ContentType::Mixed,
        ] {
            let chunks = SemanticChunker::new()
                .chunk(" \n\n\t", &config(10, 0.5, content_type))
                .unwrap();
            assert!(chunks.is_empty());
        }
    }
}
