use std::path::PathBuf;

use chunkwise_core::{ChunkStrategy, ContentType};
use clap::Parser;

/// Split a document into overlapping, position-tracked chunks.
///
/// Settings come from the environment (`CHUNK_SIZE`, `CHUNK_OVERLAP`, ...,
/// optionally prefixed by `CHUNKWISE_PROFILE`); flags override them.
#[derive(Parser, Debug)]
#[command(name = "chunkwise", version, about)]
pub struct CliArgs {
    /// File to chunk (.txt, .md or .pdf)
    pub file: PathBuf,

    /// Maximum chunk size in characters
    #[arg(long, env = "CHUNKWISE_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Overlap between neighboring chunks, as a fraction of the chunk size (0.0 - 1.0)
    #[arg(long, env = "CHUNKWISE_OVERLAP")]
    pub overlap: Option<f64>,

    /// Chunking strategy: sentence, paragraph, or semantic
    #[arg(long, env = "CHUNKWISE_STRATEGY")]
    pub strategy: Option<ChunkStrategy>,

    /// Content type: prose, code, markdown, or mixed
    #[arg(long, env = "CHUNKWISE_CONTENT_TYPE")]
    pub content_type: Option<ContentType>,

    /// Print chunk statistics instead of the chunks
    #[arg(long)]
    pub stats: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
