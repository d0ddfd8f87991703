//! Markdown chunking: header-delimited sections.

use chunkwise_core::constants::PARAGRAPH_SEPARATOR;
use chunkwise_core::ChunkError;
use tracing::debug;

use super::helpers::Packer;
use super::segment::{lines, span_segment, Line};
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig, Segment};

fn is_header(line: &Line<'_>) -> bool {
    line.text.starts_with('#')
}

/// Split into sections: each header line plus everything up to the next
/// header. Text before the first header is a section of its own.
pub(crate) fn sections(text: &str) -> Vec<Segment> {
    let mut sections = Vec::new();
    let mut current: Vec<Line<'_>> = Vec::new();

    for line in lines(text) {
        if is_header(&line) && !current.is_empty() {
            sections.extend(span_segment(text, &current, true));
            current.clear();
        }
        current.push(line);
    }
    sections.extend(span_segment(text, &current, true));
    sections
}

pub(crate) fn chunk_markdown(
    text: &str,
    config: &ChunkingConfig,
    sentences: &dyn ChunkStrategy,
) -> Result<Vec<Chunk>, ChunkError> {
    let mut packer = Packer::new(config, PARAGRAPH_SEPARATOR);

    for section in sections(text) {
        if section.char_len() > config.chunk_size() {
            debug!(
                start = section.range.start,
                chars = section.char_len(),
                "Oversized markdown section, delegating to {}",
                sentences.name()
            );
            let sub = sentences
                .chunk(&section.text, config)
                .map_err(|e| e.in_strategy("markdown->sentence"))?;
            packer.splice(sub, section.range.start);
            continue;
        }
        packer.push(section);
    }
    Ok(packer.finish())
}
