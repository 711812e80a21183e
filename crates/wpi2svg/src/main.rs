//! WPI to SVG converter.
//!
//! Usage:
//!   wpi2svg <file.wpi>     Write file.svg next to the input

use std::process::ExitCode;

use clap::Parser;
use wpi2svg::Cli;

fn main() -> ExitCode {
    wpi2svg::run(Cli::parse())
}
