//! Chunk output types.

use serde::{Deserialize, Serialize};

use crate::config::ContentType;

/// Position and classification of a chunk within its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// 0-based position within the produced list.
    pub index: usize,
    /// Character offset (inclusive) into the text passed to the top-level call.
    pub start_position: usize,
    /// Character offset (exclusive) into the text passed to the top-level call.
    pub end_position: usize,
    pub has_overlap_with_previous: bool,
    pub has_overlap_with_next: bool,
    pub content_type: ContentType,
    /// Originating document, stamped after chunking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A bounded slice of text ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Length of the chunk text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character span `[start, end)` in the source text.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.metadata.start_position..self.metadata.end_position
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary of a chunk list, sizes in characters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub count: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub mean_len: f64,
    pub total_len: usize,
    /// Chunks that share content with their predecessor.
    pub overlapping: usize,
}

impl ChunkStats {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        if chunks.is_empty() {
            return Self::default();
        }

        let lengths: Vec<usize> = chunks.iter().map(Chunk::char_len).collect();
        let total_len: usize = lengths.iter().sum();

        Self {
            count: chunks.len(),
            min_len: lengths.iter().copied().min().unwrap_or(0),
            max_len: lengths.iter().copied().max().unwrap_or(0),
            mean_len: total_len as f64 / chunks.len() as f64,
            total_len,
            overlapping: chunks
                .iter()
                .filter(|c| c.metadata.has_overlap_with_previous)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chunk(index: usize, text: &str, start: usize, overlap: bool) -> Chunk {
        Chunk {
            text: text.to_string(),
            metadata: ChunkMetadata {
                index,
                start_position: start,
                end_position: start + text.chars().count(),
                has_overlap_with_previous: overlap,
                has_overlap_with_next: false,
                content_type: ContentType::Prose,
                source: None,
            },
        }
    }

    #[test]
    fn char_len_counts_scalars_not_bytes() {
        let chunk = make_chunk(0, "héllo 🎉", 0, false);
        assert_eq!(chunk.char_len(), 7);
        assert_eq!(chunk.span(), 0..7);
    }

    #[test]
    fn with_source_stamps_metadata() {
        let chunk = make_chunk(0, "text", 0, false).with_source("notes.md");
        assert_eq!(chunk.metadata.source.as_deref(), Some("notes.md"));
    }

    #[test]
    fn source_is_omitted_from_json_when_absent() {
        let json = serde_json::to_value(make_chunk(0, "text", 0, false)).unwrap();
        assert!(json["metadata"].get("source").is_none());
        assert_eq!(json["metadata"]["content_type"], "prose");
    }

    #[test]
    fn stats_summarize_lengths() {
        let chunks = vec![
            make_chunk(0, "abcd", 0, false),
            make_chunk(1, "abcdefgh", 2, true),
            make_chunk(2, "ab", 8, true),
        ];
        let stats = ChunkStats::from_chunks(&chunks);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_len, 2);
        assert_eq!(stats.max_len, 8);
        assert_eq!(stats.total_len, 14);
        assert!((stats.mean_len - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.overlapping, 2);
    }

    #[test]
    fn stats_of_empty_list() {
        assert_eq!(ChunkStats::from_chunks(&[]), ChunkStats::default());
    }
}
