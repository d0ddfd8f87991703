use std::borrow::Cow;

use tracing::warn;

use super::{ExtractionError, PageContent};

/// Decode bytes as UTF-8, replacing invalid sequences.
pub(super) fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        warn!("Input is not valid UTF-8, invalid sequences were replaced");
    }
    text
}

pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    Ok(vec![PageContent {
        page_number: 1,
        text: decode(bytes).trim().to_string(),
        headings: Vec::new(),
    }])
}
