//! CLI Module
//!
//! Command-line interface for the Landau looper.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::looper::DEFAULT_MAX_SEARCH_N;
use crate::partition::Partition;

/// Landau Looper - loop audio by the partition with the largest LCM
#[derive(Parser, Debug)]
#[command(name = "landau")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute g(n) and an optimal partition of n
    #[command(name = "solve")]
    Solve {
        /// The integer to partition
        n: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print g(n) for every n up to MAX_N
    #[command(name = "table")]
    Table {
        /// Largest n to compute
        max_n: u32,
    },

    /// Loop a WAV file by its Landau partition
    #[command(name = "loop")]
    Loop {
        /// Input WAV file
        input: PathBuf,

        /// Output path (default: <input>_landau.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Partition to use instead of the optimal one, e.g. 5,4,3
        #[arg(short, long, value_parser = parse_partition)]
        partition: Option<Partition>,

        /// Output bit depth: 16, 24 or 32 (float)
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,

        /// Largest clip length, in seconds, to search partitions for
        #[arg(long, default_value_t = DEFAULT_MAX_SEARCH_N)]
        max_n: u32,
    },

    /// Synthesize a demo clip and loop it
    #[command(name = "demo")]
    Demo {
        /// Length of the demo clip in seconds
        #[arg(short, long, default_value_t = 10)]
        seconds: u32,

        /// Sample rate in Hz
        #[arg(short = 'r', long, default_value_t = 44100)]
        sample_rate: u32,

        /// Directory for the demo files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Output bit depth: 16, 24 or 32 (float)
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,
    },
}

/// Parse a comma-separated list of positive part lengths
///
/// Whitespace around each part is ignored: `"5, 4, 3"` and `"5,4,3"` are
/// the same partition.
pub fn parse_partition(value: &str) -> std::result::Result<Partition, String> {
    let input = value.trim();
    if input.is_empty() {
        return Err("partition cannot be empty".into());
    }

    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<u32>() {
                Ok(0) => Err("partition parts must be greater than zero".to_string()),
                Ok(p) => Ok(p),
                Err(_) => Err(format!("invalid partition part '{}'", part)),
            }
        })
        .collect::<std::result::Result<Vec<u32>, String>>()
        .map(Partition::new)
}
