use thiserror::Error;

/// Boxed foreign error carried through the chunking engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),

    #[error("Chunking failed in {strategy}: {source}")]
    ChunkingFailed {
        strategy: &'static str,
        #[source]
        source: BoxError,
    },

    /// A failure raised by a strategy implementation outside this engine.
    /// Converted to `ChunkingFailed` at the first delegation point that sees it.
    #[error("{0}")]
    External(BoxError),
}

impl ChunkError {
    /// Wrap a foreign error with the name of the delegation path that surfaced it.
    ///
    /// Engine errors pass through untouched so a failure is wrapped exactly once.
    pub fn in_strategy(self, strategy: &'static str) -> Self {
        match self {
            ChunkError::External(source) => ChunkError::ChunkingFailed { strategy, source },
            other => other,
        }
    }

    pub fn external<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ChunkError::External(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_chunk_size_display() {
        let err = ChunkError::InvalidChunkSize(0);
        assert_eq!(
            err.to_string(),
            "Invalid chunk size: 0 (must be greater than zero)"
        );
    }

    #[test]
    fn external_is_wrapped_with_strategy() {
        let err = ChunkError::external("tokenizer exploded").in_strategy("sentence->word");
        match err {
            ChunkError::ChunkingFailed { strategy, source } => {
                assert_eq!(strategy, "sentence->word");
                assert_eq!(source.to_string(), "tokenizer exploded");
            }
            other => panic!("expected ChunkingFailed, got {other:?}"),
        }
    }

    #[test]
    fn engine_errors_are_not_double_wrapped() {
        let inner = ChunkError::external("boom").in_strategy("paragraph->sentence");
        let outer = inner.in_strategy("semantic->paragraph");
        match outer {
            ChunkError::ChunkingFailed { strategy, .. } => {
                assert_eq!(strategy, "paragraph->sentence");
            }
            other => panic!("expected ChunkingFailed, got {other:?}"),
        }

        let invalid = ChunkError::InvalidChunkSize(0).in_strategy("sentence->word");
        assert!(matches!(invalid, ChunkError::InvalidChunkSize(0)));
    }
}
