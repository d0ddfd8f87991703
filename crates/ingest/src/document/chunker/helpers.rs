//! Chunk assembly and the accumulate/flush/overlap loop shared by every strategy.

use std::collections::VecDeque;

use super::overlap::calculate_overlap;
use super::types::{Chunk, ChunkMetadata, ChunkingConfig, Segment};

/// Join `segments` into one chunk.
///
/// Positions come from the first and last segment ranges, never from the
/// joined string. Returns `None` for an empty segment list so trimmed-away
/// accumulators are skipped instead of producing empty chunks.
pub(crate) fn assemble(
    segments: &[Segment],
    separator: &str,
    running_chunk_count: usize,
    has_next: bool,
    config: &ChunkingConfig,
) -> Option<Chunk> {
    let first = segments.first()?;
    let last = segments.last()?;
    let overlapping = config.overlap_size() > 0;

    let text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(separator);

    Some(Chunk {
        text,
        metadata: ChunkMetadata {
            index: running_chunk_count,
            start_position: first.range.start,
            end_position: last.range.end,
            has_overlap_with_previous: running_chunk_count > 0 && overlapping,
            has_overlap_with_next: has_next && overlapping,
            content_type: config.content_type(),
            source: None,
        },
    })
}

/// Shift chunk positions produced on a substring back into the parent text.
pub(crate) fn rebase(chunks: Vec<Chunk>, offset: usize) -> impl Iterator<Item = Chunk> {
    chunks.into_iter().map(move |mut chunk| {
        chunk.metadata.start_position += offset;
        chunk.metadata.end_position += offset;
        chunk
    })
}

/// Renumber chunks by position and derive overlap flags from their neighbors.
pub(crate) fn finalize(mut chunks: Vec<Chunk>, config: &ChunkingConfig) -> Vec<Chunk> {
    let overlapping = config.overlap_size() > 0;
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.metadata.index = i;
        chunk.metadata.has_overlap_with_previous = overlapping && i > 0;
        chunk.metadata.has_overlap_with_next = overlapping && i < last;
    }
    chunks
}

/// Last `count` lines of the accumulated segments, walking backward.
///
/// A segment with more lines than still needed contributes only its tail,
/// cut at a line boundary; its range is shortened to match.
pub(crate) fn trailing_lines(segments: &[Segment], count: usize) -> Vec<Segment> {
    let mut remaining = count;
    let mut tail = Vec::new();

    for segment in segments.iter().rev() {
        if remaining == 0 {
            break;
        }
        let line_count = segment.text.split('\n').count();
        if line_count <= remaining {
            tail.push(segment.clone());
            remaining -= line_count;
            continue;
        }
        if let Some((idx, _)) = segment.text.rmatch_indices('\n').nth(remaining - 1) {
            let text = &segment.text[idx + 1..];
            let end = segment.range.end;
            tail.push(Segment::new(text, end - text.chars().count()..end));
        }
        remaining = 0;
    }

    tail.reverse();
    tail
}

// ── Packer ──────────────────────────────────────────────────────────────────

/// What the next chunk inherits from a flushed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverlapMode {
    /// Whole trailing segments up to the configured overlap size.
    Characters,
    /// A fixed number of trailing lines.
    TrailingLines(usize),
}

/// Accumulates segments into chunks no larger than `chunk_size`.
///
/// `size` is always the character length of the accumulator joined with the
/// separator: the sum of segment lengths plus one separator between each pair.
pub(crate) struct Packer<'c> {
    config: &'c ChunkingConfig,
    separator: &'static str,
    separator_len: usize,
    overlap: OverlapMode,
    chunks: Vec<Chunk>,
    acc: VecDeque<Segment>,
    size: usize,
}

impl<'c> Packer<'c> {
    pub(crate) fn new(config: &'c ChunkingConfig, separator: &'static str) -> Self {
        Self {
            config,
            separator,
            separator_len: separator.chars().count(),
            overlap: OverlapMode::Characters,
            chunks: Vec::new(),
            acc: VecDeque::new(),
            size: 0,
        }
    }

    pub(crate) fn with_overlap(mut self, overlap: OverlapMode) -> Self {
        self.overlap = overlap;
        self
    }

    fn cost(&self, len: usize) -> usize {
        if self.acc.is_empty() {
            len
        } else {
            self.size + self.separator_len + len
        }
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        let len = segment.char_len();
        let budget = self.config.chunk_size();

        if !self.acc.is_empty() && self.cost(len) > budget {
            self.flush(true);
            self.seed_overlap();
        }

        // Carried-over overlap plus the new segment may still overflow.
        while !self.acc.is_empty() && self.cost(len) > budget {
            self.pop_front();
        }

        self.size = self.cost(len);
        self.acc.push_back(segment);
    }

    /// Flush the accumulator and append chunks produced by a delegate for a
    /// segment starting at `offset`. The accumulator restarts empty.
    pub(crate) fn splice(&mut self, sub_chunks: Vec<Chunk>, offset: usize) {
        self.flush(true);
        self.clear();
        self.chunks.extend(rebase(sub_chunks, offset));
    }

    pub(crate) fn finish(mut self) -> Vec<Chunk> {
        self.flush(false);
        finalize(self.chunks, self.config)
    }

    fn flush(&mut self, has_next: bool) {
        let segments = self.acc.make_contiguous();
        if let Some(chunk) = assemble(
            segments,
            self.separator,
            self.chunks.len(),
            has_next,
            self.config,
        ) {
            self.chunks.push(chunk);
        }
    }

    fn seed_overlap(&mut self) {
        let target = self.config.overlap_size();
        if target == 0 {
            self.clear();
            return;
        }
        match self.overlap {
            OverlapMode::Characters => {
                let separator_len = self.separator_len;
                let segments: &[Segment] = self.acc.make_contiguous();
                let selection = calculate_overlap(segments, target, separator_len);
                self.acc.drain(..selection.start);
                self.size = selection.size;
            }
            OverlapMode::TrailingLines(count) => {
                let tail = trailing_lines(self.acc.make_contiguous(), count);
                self.clear();
                for segment in tail {
                    self.size = self.cost(segment.char_len());
                    self.acc.push_back(segment);
                }
            }
        }
    }

    fn pop_front(&mut self) {
        if let Some(removed) = self.acc.pop_front() {
            self.size -= removed.char_len();
            if !self.acc.is_empty() {
                self.size -= self.separator_len;
            }
        }
    }

    fn clear(&mut self) {
        self.acc.clear();
        self.size = 0;
    }
}
