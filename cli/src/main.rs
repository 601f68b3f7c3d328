//! gguf-forge CLI: write fuzzing corpora of GGUF container files.
//!
//! The library produces byte buffers; this binary is the thin I/O layer
//! that puts them on disk for a fuzzer to pick up.
//!
//! ```bash
//! # Seed set plus 20 random documents
//! gguf-forge corpus ./corpus --count 20 --seed 1
//!
//! # One reproducible random document
//! gguf-forge random model.gguf --seed 42 --max-size-kb 200
//!
//! # One catalogue entry (here: negative header counts)
//! gguf-forge malformed bad.gguf --variant 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gguf_forge::{build_malformed_document, build_random_document, seed_corpus};

#[derive(Parser)]
#[command(
    name = "gguf-forge",
    version,
    about = "Generate GGUF fuzzing corpora: realistic random model files, valid edge cases, and deliberately malformed variants",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a full corpus: the named seed set plus N random documents
    Corpus {
        /// Output directory for corpus files
        output_dir: PathBuf,
        /// Number of random documents to generate
        #[arg(long, default_value_t = 20)]
        count: u32,
        /// Base RNG seed; random document i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Maximum size per random document, in KiB
        #[arg(long, default_value_t = 100)]
        max_size_kb: u64,
    },
    /// Write one random document
    Random {
        /// Output file path
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Maximum document size, in KiB
        #[arg(long, default_value_t = 100)]
        max_size_kb: u64,
    },
    /// Write one malformed catalogue entry
    Malformed {
        /// Output file path
        output: PathBuf,
        /// Catalogue index (0..8)
        #[arg(long)]
        variant: u32,
        /// Seed for payload randomness (random-garbage variant only)
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Commands::Corpus {
            output_dir,
            count,
            seed,
            max_size_kb,
        } => write_corpus(&output_dir, count, seed, max_size_kb),
        Commands::Random {
            output,
            seed,
            max_size_kb,
        } => {
            let data = build_random_document(max_size_kb * 1024, seed)?;
            write_file(&output, &data)
        }
        Commands::Malformed {
            output,
            variant,
            seed,
        } => {
            let data = build_malformed_document(variant, seed)?;
            write_file(&output, &data)
        }
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = data.len(), "wrote document");
    Ok(())
}

fn write_corpus(output_dir: &Path, count: u32, seed: u64, max_size_kb: u64) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut written = 0usize;
    for (name, data) in seed_corpus(seed)? {
        write_file(&output_dir.join(name), &data)?;
        written += 1;
    }
    for i in 0..count {
        let data = build_random_document(max_size_kb * 1024, seed + u64::from(i))?;
        write_file(&output_dir.join(format!("random_{i:03}.gguf")), &data)?;
        written += 1;
    }
    info!(files = written, dir = %output_dir.display(), "corpus complete");
    Ok(())
}
