use tracing::{debug, warn};

use super::{ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8], filename: &str) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    if text.trim().is_empty() {
        // Scanned/image PDFs extract to nothing.
        warn!(filename, "PDF contains no extractable text");
        return Err(ExtractionError::EmptyResult(filename.to_string()));
    }

    let pages = split_pages(&text);
    debug!(filename, pages = pages.len(), "Extracted PDF text");
    Ok(pages)
}

/// pdf-extract returns all text as one string with form feeds between pages.
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0C')
        .enumerate()
        .filter(|(_, page_text)| !page_text.trim().is_empty())
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: page_text.trim().to_string(),
            headings: Vec::new(),
        })
        .collect()
}
