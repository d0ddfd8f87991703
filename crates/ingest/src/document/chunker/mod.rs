//! Position-tracked chunking engine.
//!
//! Splits text into chunks bounded by a character budget, with overlap
//! between neighbors. Strategies nest: paragraphs fall back to sentences,
//! sentences to words, and the semantic chunker routes on content type
//! (prose, code, markdown, or mixed prose with fenced code).
//!
//! All positions are character (Unicode scalar) offsets into the text passed
//! to the top-level call.

mod code;
mod helpers;
mod markdown;
mod mixed;
mod overlap;
mod paragraph;
mod segment;
mod semantic;
mod sentence;
mod strategies;
mod types;
mod word;

pub use overlap::{calculate_overlap, OverlapSelection};
pub use paragraph::ParagraphChunker;
pub use segment::{segment, SegmentUnit, Segments};
pub use semantic::SemanticChunker;
pub use sentence::SentenceChunker;
pub use strategies::{chunk, chunk_with_source, ChunkStrategy, Chunker};
pub use types::{Chunk, ChunkMetadata, ChunkingConfig, Segment};
pub use word::WordChunker;
