use chunkwise_core::constants::CODE_FENCE;

use super::txt::decode;
use super::{ExtractionError, PageContent};

pub fn extract_md(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = decode(bytes);
    Ok(vec![PageContent {
        page_number: 1,
        headings: headings(&text),
        text: text.trim().to_string(),
    }])
}

/// Heading titles in document order. `#` lines inside fenced code are comments, not headings.
fn headings(text: &str) -> Vec<String> {
    let mut in_fence = false;
    let mut found = Vec::new();
    for line in text.lines() {
        if line.trim_start().starts_with(CODE_FENCE) {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence && line.starts_with('#') {
            let title = line.trim_start_matches('#').trim();
            if !title.is_empty() {
                found.push(title.to_string());
            }
        }
    }
    found
}
