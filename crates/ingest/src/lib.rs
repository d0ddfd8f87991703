pub mod document;
pub mod pipeline;

pub use document::chunker::{chunk, chunk_with_source, ChunkStrategy, Chunker};
pub use document::{extract_text, parse_file, ExtractedDocument, ExtractionError, PageContent};
pub use pipeline::{chunk_batch, chunk_document, chunk_file, DocumentError};
