//! Separators and fixed sizes shared by every chunking strategy.

/// Joins words inside a chunk.
pub const WORD_SEPARATOR: &str = " ";

/// Joins sentences inside a chunk.
pub const SENTENCE_SEPARATOR: &str = " ";

/// Joins paragraphs, markdown sections and code blocks inside a chunk.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Joins source lines inside a code chunk.
pub const LINE_SEPARATOR: &str = "\n";

/// Trailing lines carried into the next code chunk when overlap is enabled.
pub const CODE_OVERLAP_LINES: usize = 3;

/// Prefix of a fenced code delimiter line in mixed content.
pub const CODE_FENCE: &str = "```";

/// Default character budget per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default fraction of the budget reused as overlap.
pub const DEFAULT_OVERLAP_PERCENTAGE: f64 = 0.1;

