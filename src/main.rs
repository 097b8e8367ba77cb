//! Landau Looper CLI
//!
//! Command-line interface for the Landau function search and audio looper.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use landau::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Landau Looper v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Landau Looper v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Solve { n, json } => {
            commands::solve(n, json).with_context(|| format!("failed to solve n={}", n))
        }
        Commands::Table { max_n } => commands::table(max_n).context("failed to print table"),
        Commands::Loop {
            input,
            output,
            partition,
            bit_depth,
            max_n,
        } => {
            if !input.is_file() {
                anyhow::bail!("input file does not exist: {}", input.display());
            }
            commands::loop_file(
                &input,
                output.as_deref(),
                partition.as_ref(),
                bit_depth,
                max_n,
            )
            .map(|_| ())
            .with_context(|| format!("failed to loop '{}'", input.display()))
        }
        Commands::Demo {
            seconds,
            sample_rate,
            out_dir,
            bit_depth,
        } => commands::demo(seconds, sample_rate, &out_dir, bit_depth)
            .map(|_| ())
            .context("failed to run demo"),
    }
}
