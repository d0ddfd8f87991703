mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use chunkwise_core::config::load_dotenv;
use chunkwise_core::{ChunkStats, ChunkingConfig, Config};
use chunkwise_ingest::chunk_file;

use crate::cli::CliArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    let chunking = apply_overrides(config.chunking, &args);
    chunking.validate().context("invalid chunking configuration")?;

    let chunks = chunk_file(&args.file, &chunking)
        .with_context(|| format!("failed to chunk {}", args.file.display()))?;
    info!(chunks = chunks.len(), "Done");

    if args.stats {
        print_json(&ChunkStats::from_chunks(&chunks), args.pretty)
    } else {
        print_json(&chunks, args.pretty)
    }
}

/// CLI flags take precedence over environment configuration.
fn apply_overrides(mut chunking: ChunkingConfig, args: &CliArgs) -> ChunkingConfig {
    if let Some(size) = args.chunk_size {
        chunking = chunking.with_chunk_size(size);
    }
    if let Some(overlap) = args.overlap {
        chunking = chunking.with_overlap_percentage(overlap);
    }
    if let Some(strategy) = args.strategy {
        chunking = chunking.with_strategy(strategy);
    }
    if let Some(content_type) = args.content_type {
        chunking = chunking.with_content_type(content_type);
    }
    chunking
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwise_core::{ChunkStrategy, ContentType};

    #[test]
    fn flags_override_environment_config() {
        let args = CliArgs::try_parse_from([
            "chunkwise",
            "doc.txt",
            "--chunk-size",
            "200",
            "--overlap",
            "2.0",
            "--content-type",
            "code",
        ])
        .unwrap();
        let chunking = apply_overrides(ChunkingConfig::default(), &args);
        assert_eq!(chunking.chunk_size(), 200);
        assert_eq!(chunking.overlap_percentage(), 1.0);
        assert_eq!(chunking.strategy(), ChunkStrategy::Semantic);
        assert_eq!(chunking.content_type(), ContentType::Code);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = CliArgs::try_parse_from(["chunkwise", "doc.txt"]).unwrap();
        let base = ChunkingConfig::default().with_chunk_size(321);
        assert_eq!(apply_overrides(base, &args), base);
    }
}
