//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use log::info;

use crate::engine::io::{
    demo_signal, export_audio, landau_audio_loop_from_file, ExportFormat, FileLoopOutcome,
};
use crate::error::Result;
use crate::looper::{Looper, LooperConfig};
use crate::observer::LogObserver;
use crate::partition::{landau, landau_table, Partition};

/// Print g(n) and an optimal partition.
pub fn solve(n: u32, json: bool) -> Result<()> {
    info!("Searching partitions of {}", n);

    let result = landau(n);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("g({}) = {}", result.n, result.g_n);
        println!("Partition: {}", result.partition);
    }

    Ok(())
}

/// Print g(n) for n = 0..=max_n.
pub fn table(max_n: u32) -> Result<()> {
    println!("{:>4}  {:>12}  partition", "n", "g(n)");
    println!("{:-<40}", "");
    for row in landau_table(max_n) {
        println!("{:>4}  {:>12}  {}", row.n, row.g_n, row.partition);
    }
    Ok(())
}

/// Loop a WAV file and write the result.
pub fn loop_file(
    input: &Path,
    output: Option<&Path>,
    partition: Option<&Partition>,
    bit_depth: u16,
    max_n: u32,
) -> Result<FileLoopOutcome> {
    info!("Looping audio: {}", input.display());

    let looper = Looper::new(LooperConfig::default().with_max_search_n(Some(max_n)));
    let outcome = landau_audio_loop_from_file(
        input,
        output,
        partition,
        &looper,
        ExportFormat::new(bit_depth),
        &mut LogObserver,
    )?;

    println!(
        "g(n) = {} using partition {} at {} Hz",
        outcome.g_n, outcome.partition, outcome.sample_rate
    );
    println!("Saved to: {}", outcome.output_path.display());

    Ok(outcome)
}

/// Paths written by [`demo`]
#[derive(Debug, Clone)]
pub struct DemoFiles {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Synthesize the demo clip, loop it, and write both files.
pub fn demo(seconds: u32, sample_rate: u32, out_dir: &Path, bit_depth: u16) -> Result<DemoFiles> {
    println!("{}", "=".repeat(50));
    println!("LANDAU AUDIO LOOPER DEMO");
    println!("{}", "=".repeat(50));

    let audio = demo_signal(seconds, sample_rate)?;
    let looped = Looper::default().run(&audio, None, &mut LogObserver)?;

    println!("Input: {} samples ({}s)", audio.len(), seconds);
    println!("Output: {} samples ({}s)", looped.audio.len(), looped.g_n);

    let format = ExportFormat::new(bit_depth);
    let files = DemoFiles {
        input: out_dir.join(format!("demo_input_{}s.wav", seconds)),
        output: out_dir.join(format!("demo_output_landau_{}s.wav", looped.g_n)),
    };
    export_audio(&audio, &files.input, format)?;
    export_audio(&looped.audio, &files.output, format)?;

    println!("Demo files saved:");
    println!("  - {} ({} seconds)", files.input.display(), seconds);
    println!("  - {} ({} seconds)", files.output.display(), looped.g_n);

    Ok(files)
}
