//! Document pipeline: extract text from files, then chunk it.

use std::path::Path;
use std::time::Instant;

use chunkwise_core::{Chunk, ChunkError, ChunkingConfig, ContentType};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::document::chunker::chunk_with_source;
use crate::document::{parse_file, ExtractedDocument, ExtractionError};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunking(#[from] ChunkError),
    #[error("Document produced no chunks: {0}")]
    EmptyDocument(String),
}

/// The config actually used for a document. Markdown files configured as
/// plain prose are chunked as markdown so headers become boundaries.
pub fn effective_config(doc: &ExtractedDocument, config: &ChunkingConfig) -> ChunkingConfig {
    if doc.is_markdown() && config.content_type() == ContentType::Prose {
        config.with_content_type(ContentType::Markdown)
    } else {
        *config
    }
}

pub fn chunk_document(
    doc: &ExtractedDocument,
    config: &ChunkingConfig,
) -> Result<Vec<Chunk>, DocumentError> {
    let start = Instant::now();
    let config = effective_config(doc, config);
    let text = doc.full_text();

    let chunks = chunk_with_source(&text, &config, &doc.filename)?;
    if chunks.is_empty() {
        return Err(DocumentError::EmptyDocument(doc.filename.clone()));
    }

    info!(
        filename = %doc.filename,
        file_type = %doc.file_type,
        pages = doc.pages.len(),
        chars = doc.total_chars(),
        chunks = chunks.len(),
        strategy = %config.strategy(),
        content_type = %config.content_type(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chunked document"
    );
    Ok(chunks)
}

/// Extract `path` and chunk its text.
pub fn chunk_file(path: &Path, config: &ChunkingConfig) -> Result<Vec<Chunk>, DocumentError> {
    let doc = parse_file(path)?;
    chunk_document(&doc, config)
}

/// Chunk many `(source, text)` pairs in parallel. Results keep input order.
pub fn chunk_batch(
    inputs: &[(&str, &str)],
    config: &ChunkingConfig,
) -> Vec<Result<Vec<Chunk>, ChunkError>> {
    let start = Instant::now();
    let results: Vec<_> = inputs
        .par_iter()
        .map(|(source, text)| chunk_with_source(text, config, source))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        inputs = inputs.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chunked batch"
    );
    results
}
