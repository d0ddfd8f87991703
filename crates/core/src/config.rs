use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_PERCENTAGE};
use crate::error::ChunkError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_parse<T: FromStr>(profile: &str, key: &str, default: T) -> T {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

// ── Enums ─────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Top-level strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    Sentence,
    Paragraph,
    Semantic,
}

impl ChunkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Sentence => "sentence",
            ChunkStrategy::Paragraph => "paragraph",
            ChunkStrategy::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkStrategy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentence" => Ok(ChunkStrategy::Sentence),
            "paragraph" => Ok(ChunkStrategy::Paragraph),
            "semantic" => Ok(ChunkStrategy::Semantic),
            other => Err(ParseEnumError {
                kind: "strategy",
                value: other.to_string(),
            }),
        }
    }
}

/// Which boundary rules apply to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Prose,
    Code,
    Markdown,
    Mixed,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Prose => "prose",
            ContentType::Code => "code",
            ContentType::Markdown => "markdown",
            ContentType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prose" | "text" => Ok(ContentType::Prose),
            "code" => Ok(ContentType::Code),
            "markdown" | "md" => Ok(ContentType::Markdown),
            "mixed" => Ok(ContentType::Mixed),
            other => Err(ParseEnumError {
                kind: "content type",
                value: other.to_string(),
            }),
        }
    }
}

// ── Chunking config ───────────────────────────────────────────

/// Immutable configuration for one chunking call.
///
/// `overlap_percentage` is clamped into `[0.0, 1.0]` on every construction
/// path, deserialization included. A `chunk_size` of zero can be constructed
/// but is rejected by every strategy entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawChunkingConfig")]
pub struct ChunkingConfig {
    chunk_size: usize,
    overlap_percentage: f64,
    strategy: ChunkStrategy,
    content_type: ContentType,
}

#[derive(Deserialize)]
struct RawChunkingConfig {
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_overlap_percentage")]
    overlap_percentage: f64,
    #[serde(default = "default_strategy")]
    strategy: ChunkStrategy,
    #[serde(default = "default_content_type")]
    content_type: ContentType,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_overlap_percentage() -> f64 {
    DEFAULT_OVERLAP_PERCENTAGE
}

fn default_strategy() -> ChunkStrategy {
    ChunkStrategy::Semantic
}

fn default_content_type() -> ContentType {
    ContentType::Prose
}

impl From<RawChunkingConfig> for ChunkingConfig {
    fn from(raw: RawChunkingConfig) -> Self {
        Self::new(
            raw.chunk_size,
            raw.overlap_percentage,
            raw.strategy,
            raw.content_type,
        )
    }
}

fn clamp_overlap(percentage: f64) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 1.0)
    }
}

impl ChunkingConfig {
    pub fn new(
        chunk_size: usize,
        overlap_percentage: f64,
        strategy: ChunkStrategy,
        content_type: ContentType,
    ) -> Self {
        Self {
            chunk_size,
            overlap_percentage: clamp_overlap(overlap_percentage),
            strategy,
            content_type,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap_percentage(&self) -> f64 {
        self.overlap_percentage
    }

    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Overlap budget in characters: `floor(chunk_size * overlap_percentage)`.
    pub fn overlap_size(&self) -> usize {
        (self.chunk_size as f64 * self.overlap_percentage).floor() as usize
    }

    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        Self { chunk_size, ..self }
    }

    pub fn with_overlap_percentage(self, overlap_percentage: f64) -> Self {
        Self {
            overlap_percentage: clamp_overlap(overlap_percentage),
            ..self
        }
    }

    pub fn with_strategy(self, strategy: ChunkStrategy) -> Self {
        Self { strategy, ..self }
    }

    pub fn with_content_type(self, content_type: ContentType) -> Self {
        Self {
            content_type,
            ..self
        }
    }

    /// Reject configurations no strategy can work with.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    fn from_env_profiled(p: &str) -> Self {
        let chunk_size = profiled_env_parse(p, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE);
        let overlap = profiled_env_parse(p, "CHUNK_OVERLAP", DEFAULT_OVERLAP_PERCENTAGE);
        let strategy = profiled_env_parse(p, "CHUNK_STRATEGY", ChunkStrategy::Semantic);
        let content_type = profiled_env_parse(p, "CHUNK_CONTENT_TYPE", ContentType::Prose);
        Self::new(chunk_size, overlap, strategy, content_type)
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_CHUNK_SIZE,
            DEFAULT_OVERLAP_PERCENTAGE,
            ChunkStrategy::Semantic,
            ContentType::Prose,
        )
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CHUNKWISE_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CHUNKWISE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        let c = &self.chunking;
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:    size={}, overlap={} ({} chars), strategy={}, content_type={}",
            c.chunk_size(),
            c.overlap_percentage(),
            c.overlap_size(),
            c.strategy(),
            c.content_type()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_clamped_on_construction() {
        let high = ChunkingConfig::new(100, 1.7, ChunkStrategy::Sentence, ContentType::Prose);
        assert_eq!(high.overlap_percentage(), 1.0);
        assert_eq!(high.overlap_size(), 100);

        let low = ChunkingConfig::new(100, -0.5, ChunkStrategy::Sentence, ContentType::Prose);
        assert_eq!(low.overlap_percentage(), 0.0);
        assert_eq!(low.overlap_size(), 0);

        let nan = ChunkingConfig::default().with_overlap_percentage(f64::NAN);
        assert_eq!(nan.overlap_percentage(), 0.0);
    }

    #[test]
    fn overlap_size_floors() {
        let config = ChunkingConfig::new(33, 0.1, ChunkStrategy::Paragraph, ContentType::Prose);
        assert_eq!(config.overlap_size(), 3);
    }

    #[test]
    fn zero_chunk_size_fails_validation() {
        let config = ChunkingConfig::default().with_chunk_size(0);
        assert!(matches!(
            config.validate(),
            Err(ChunkError::InvalidChunkSize(0))
        ));
        assert!(ChunkingConfig::default().validate().is_ok());
    }

    #[test]
    fn deserialize_clamps_overlap() {
        let json = r#"{"chunk_size": 200, "overlap_percentage": 3.0, "strategy": "paragraph", "content_type": "markdown"}"#;
        let config: ChunkingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chunk_size(), 200);
        assert_eq!(config.overlap_percentage(), 1.0);
        assert_eq!(config.strategy(), ChunkStrategy::Paragraph);
        assert_eq!(config.content_type(), ContentType::Markdown);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: ChunkingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChunkingConfig::default());
    }

    #[test]
    fn enums_parse_from_str() {
        assert_eq!("Sentence".parse(), Ok(ChunkStrategy::Sentence));
        assert_eq!(" semantic ".parse(), Ok(ChunkStrategy::Semantic));
        assert!("fixed".parse::<ChunkStrategy>().is_err());
        assert_eq!("md".parse(), Ok(ContentType::Markdown));
        assert_eq!("MIXED".parse(), Ok(ContentType::Mixed));
        assert!("binary".parse::<ContentType>().is_err());
    }

    #[test]
    fn profile_label_defaults() {
        let config = Config {
            profile: String::new(),
            chunking: ChunkingConfig::default(),
        };
        assert_eq!(config.profile_label(), "default");
    }
}
