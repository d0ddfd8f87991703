//! Mixed content: prose interleaved with fenced code blocks.

use chunkwise_core::constants::CODE_FENCE;
use chunkwise_core::{ChunkError, ContentType};
use tracing::warn;

use super::helpers::{finalize, rebase};
use super::segment::{lines, span_segment, Line};
use super::strategies::ChunkStrategy;
use super::types::{Chunk, ChunkingConfig, Segment};

fn is_fence(line: &Line<'_>) -> bool {
    line.text.trim().starts_with(CODE_FENCE)
}

fn toggle(kind: ContentType) -> ContentType {
    match kind {
        ContentType::Code => ContentType::Prose,
        _ => ContentType::Code,
    }
}

/// Split text into alternating prose and code segments.
///
/// Fences only switch state in closed pairs. An odd fence count leaves the
/// last fence unpaired: it and everything after it stay prose. Paired fence
/// lines belong to neither side.
pub(crate) fn fenced_segments(text: &str) -> Vec<(ContentType, Segment)> {
    let all: Vec<Line<'_>> = lines(text).collect();
    let fences: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, line)| is_fence(line))
        .map(|(i, _)| i)
        .collect();

    let paired = fences.len() - fences.len() % 2;
    if paired < fences.len() {
        warn!(
            line = fences[paired] + 1,
            "Unterminated code fence, treating the remainder as prose"
        );
    }

    let mut segments = Vec::new();
    let mut kind = ContentType::Prose;
    let mut start = 0;

    for &fence in &fences[..paired] {
        push_run(&mut segments, text, kind, &all[start..fence]);
        kind = toggle(kind);
        start = fence + 1;
    }
    push_run(&mut segments, text, kind, &all[start..]);

    segments
}

fn push_run(
    segments: &mut Vec<(ContentType, Segment)>,
    text: &str,
    kind: ContentType,
    run: &[Line<'_>],
) {
    // Code keeps its first-line indentation.
    let trim_indent = kind != ContentType::Code;
    if let Some(segment) = span_segment(text, run, trim_indent) {
        segments.push((kind, segment));
    }
}

/// Chunk each segment with `semantic` under its own content type and stitch
/// the results back together in source order.
pub(crate) fn chunk_mixed(
    text: &str,
    config: &ChunkingConfig,
    semantic: &dyn ChunkStrategy,
) -> Result<Vec<Chunk>, ChunkError> {
    let mut chunks = Vec::new();

    for (kind, segment) in fenced_segments(text) {
        let path = match kind {
            ContentType::Code => "mixed->code",
            _ => "mixed->prose",
        };
        let sub = semantic
            .chunk(&segment.text, &config.with_content_type(kind))
            .map_err(|e| e.in_strategy(path))?;
        chunks.extend(rebase(sub, segment.range.start));
    }
    Ok(finalize(chunks, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_prose_and_code() {
        let text = "Intro prose here.\n\n```rust\nfn main() {}\n```\n\nClosing prose.";
        let segments = fenced_segments(text);
        let kinds: Vec<ContentType> = segments.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![ContentType::Prose, ContentType::Code, ContentType::Prose]
        );
        assert_eq!(segments[0].1.text, "Intro prose here.");
        assert_eq!(segments[1].1.text, "fn main() {}");
        assert_eq!(segments[1].1.range, 27..39);
        assert_eq!(segments[2].1.text, "Closing prose.");
    }

    #[test]
    fn code_keeps_indentation() {
        let text = "```\n    indented();\n```";
        let segments = fenced_segments(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].0, ContentType::Code);
        assert_eq!(segments[0].1.text, "    indented();");
    }

    #[test]
    fn unterminated_fence_stays_prose() {
        let text = "Text before.\n```\nlet x = 1;\nmore text";
        let segments = fenced_segments(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].0, ContentType::Prose);
        assert!(segments[0].1.text.contains("let x = 1;"));
    }

    #[test]
    fn unpaired_fence_after_a_closed_pair() {
        let text = "a\n```\ncode one\n```\nb\n```\ntrailing";
        let segments = fenced_segments(text);
        let kinds: Vec<ContentType> = segments.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![ContentType::Prose, ContentType::Code, ContentType::Prose]
        );
        assert_eq!(segments[2].1.text, "b\n```\ntrailing");
    }

    #[test]
    fn empty_code_block_is_skipped() {
        let text = "Before.\n```\n```\nAfter.";
        let segments = fenced_segments(text);
        let kinds: Vec<ContentType> = segments.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![ContentType::Prose, ContentType::Prose]);
    }
}
