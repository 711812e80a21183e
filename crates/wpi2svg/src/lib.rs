//! WPI to SVG conversion.
//!
//! # Usage
//!
//! ```text
//! wpi2svg [OPTIONS] <INPUT>
//! ```
//!
//! The output is written next to the input with its extension replaced
//! by `.svg`, unless `--output` is given.

pub mod cli;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::{Config, LogLevel};
pub use error::{ConfigError, ConvertError, RunError};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::CommandFactory;
use log::LevelFilter;
use wpi::OpenError;
use wpi_svg::{SvgWriter, render};

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: PathBuf,
    pub layers: usize,
    pub strokes: usize,
    pub points: usize,
    pub segments: usize,
    /// The input was cut short and only the decoded part was rendered.
    pub partial: bool,
}

/// Default output path: the input with its last extension replaced by `svg`.
///
/// Everything from the last `.` of the file name counts as the extension,
/// so `.wpi` becomes `.svg`.
pub fn output_path(input: &Path) -> PathBuf {
    match input.file_name().and_then(|name| name.to_str()) {
        Some(name) => {
            let stem = name.rfind('.').map_or(name, |i| &name[..i]);
            input.with_file_name(format!("{stem}.svg"))
        }
        None => input.with_extension("svg"),
    }
}

/// Decode `input` and write it as SVG to `output`.
///
/// The output file is only created once decoding is done.
///
/// # Errors
///
/// Fails if the input cannot be opened, the output cannot be created or
/// written, or decoding fails while `config.render_partial` is false.
pub fn convert(input: &Path, output: &Path, config: &Config) -> Result<Report, ConvertError> {
    let (canvas, partial) = match wpi::decode_file(input, config.header_len) {
        Ok(canvas) => (canvas, false),
        Err(OpenError::Decode(e)) if config.render_partial => {
            log::warn!("{}: {e}; rendering what was decoded", input.display());
            (e.into_partial(), true)
        }
        Err(OpenError::Decode(e)) => return Err(e.into()),
        Err(OpenError::Io { path, source }) => {
            return Err(ConvertError::OpenInput { path, source });
        }
    };

    log::info!(
        "{}: {} layers, {} strokes, {} points",
        input.display(),
        canvas.layer_count(),
        canvas.stroke_count(),
        canvas.point_count()
    );

    let out = File::create(output).map_err(|source| ConvertError::CreateOutput {
        path: output.to_owned(),
        source,
    })?;

    let mut writer = SvgWriter::new(BufWriter::new(out));
    render(&canvas, &mut writer).map_err(|source| ConvertError::Render {
        path: output.to_owned(),
        source,
    })?;
    let segments = writer.segments_written();

    // Best effort: the document is complete once render returns.
    match writer.into_inner().into_inner() {
        Ok(file) => {
            if let Err(e) = file.sync_all() {
                log::warn!("failed to sync {}: {e}", output.display());
            }
        }
        Err(e) => log::warn!("failed to flush {}: {}", output.display(), e.error()),
    }

    Ok(Report {
        output: output.to_owned(),
        layers: canvas.layer_count(),
        strokes: canvas.stroke_count(),
        points: canvas.point_count(),
        segments,
        partial,
    })
}

/// Install the global logger.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Run the converter with parsed arguments.
///
/// Exits with status 1 when no input is given or the conversion fails.
pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(report) => {
            log::info!(
                "wrote {} ({} segments{})",
                report.output.display(),
                report.segments,
                if report.partial { ", partial" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Err(RunError::MissingInput) => {
            eprintln!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the config, install logging and convert the input.
///
/// # Errors
///
/// Returns `RunError::MissingInput` before doing anything else if no
/// input path was given.
pub fn execute(cli: Cli) -> Result<Report, RunError> {
    let input = cli.input.ok_or(RunError::MissingInput)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    let base = config
        .as_ref()
        .map(|c| LevelFilter::from(c.log_level))
        .unwrap_or(LevelFilter::Warn);
    init_logging(cli::bump_level(base, cli.verbose));
    let config = config?;

    let output = cli.output.unwrap_or_else(|| output_path(&input));
    Ok(convert(&input, &output, &config)?)
}
