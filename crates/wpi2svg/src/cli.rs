//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "wpi2svg", version, about = "Convert WPI pen captures to SVG")]
pub struct Cli {
    /// WPI file to convert
    pub input: Option<PathBuf>,

    /// Write the SVG here instead of next to the input
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise the log level (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Raise `level` by `steps`, saturating at `Trace`.
pub fn bump_level(level: LevelFilter, steps: u8) -> LevelFilter {
    const ORDER: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let current = ORDER.iter().position(|l| *l == level).unwrap_or(0);
    ORDER[(current + usize::from(steps)).min(ORDER.len() - 1)]
}
