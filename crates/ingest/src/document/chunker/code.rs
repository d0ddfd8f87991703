//! Code chunking: logical blocks of non-blank lines, falling back to lines.

use chunkwise_core::constants::{CODE_OVERLAP_LINES, LINE_SEPARATOR, PARAGRAPH_SEPARATOR};
use tracing::debug;

use super::helpers::{OverlapMode, Packer};
use super::segment::{lines, span_segment, Line};
use super::types::{Chunk, ChunkingConfig, Segment};

/// A maximal run of non-blank lines.
struct Block {
    segment: Segment,
    lines: Vec<Segment>,
}

impl Block {
    fn from_lines(text: &str, lines: &[Line<'_>]) -> Option<Self> {
        Some(Self {
            segment: span_segment(text, lines, false)?,
            lines: lines.iter().map(Line::to_segment).collect(),
        })
    }
}

fn logical_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<Line<'_>> = Vec::new();

    for line in lines(text) {
        if line.is_blank() {
            blocks.extend(Block::from_lines(text, &current));
            current.clear();
        } else {
            current.push(line);
        }
    }
    blocks.extend(Block::from_lines(text, &current));
    blocks
}

/// Chunk source code, never splitting a line.
///
/// Overlap, when enabled, repeats the last few lines of the previous chunk
/// instead of a character budget.
pub(crate) fn chunk_code(text: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let overlap = OverlapMode::TrailingLines(CODE_OVERLAP_LINES);
    let mut packer = Packer::new(config, PARAGRAPH_SEPARATOR).with_overlap(overlap);

    for block in logical_blocks(text) {
        if block.segment.char_len() > config.chunk_size() {
            debug!(
                start = block.segment.range.start,
                lines = block.lines.len(),
                "Oversized code block, splitting by line"
            );
            packer.splice(chunk_lines(block.lines, config), 0);
            continue;
        }
        packer.push(block.segment);
    }
    packer.finish()
}

fn chunk_lines(lines: Vec<Segment>, config: &ChunkingConfig) -> Vec<Chunk> {
    let overlap = OverlapMode::TrailingLines(CODE_OVERLAP_LINES);
    let mut packer = Packer::new(config, LINE_SEPARATOR).with_overlap(overlap);
    for line in lines {
        packer.push(line);
    }
    packer.finish()
}
