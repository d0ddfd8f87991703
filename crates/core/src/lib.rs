pub mod chunk;
pub mod config;
pub mod constants;
pub mod error;

pub use chunk::*;
pub use config::{ChunkStrategy, ChunkingConfig, Config, ContentType};
pub use error::*;
