//! Segment type shared by the tokenizers, the overlap calculator and the assembler.

use std::ops::Range;

pub use chunkwise_core::{Chunk, ChunkMetadata, ChunkingConfig};

/// A unit of text with its character span in the text it was cut from.
///
/// The span always covers `text` exactly: surrounding whitespace is trimmed
/// from both, never from one alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub range: Range<usize>,
}

impl Segment {
    pub fn new(text: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
