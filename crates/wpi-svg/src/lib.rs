//! # wpi-svg - Pressure-shaded SVG for WPI strokes
//!
//! Renders a decoded [`wpi::Canvas`] as one SVG line per pair of
//! consecutive points. Each line's width and gray level come from the
//! average pen pressure at its endpoints.
//!
//! ## Output structure
//!
//! ```text
//! <svg width="2828" height="4000">
//!   <g id="l1">            one group per layer
//!     <g id="s0">          one group per stroke
//!       <line ... />       one line per segment
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use wpi_svg::{render, SvgWriter};
//!
//! let canvas = wpi::decode_file("sketch.wpi", wpi::HEADER_LEN)?;
//! let mut writer = SvgWriter::new(std::io::stdout().lock());
//! render(&canvas, &mut writer)?;
//! ```

pub mod color;
pub mod pressure;
pub mod render;
pub mod svg;

pub use color::Color;
pub use render::{CANVAS_HEIGHT, CANVAS_WIDTH, Segment, StrokeRenderer, render};
pub use svg::{SvgWriter, to_svg_string};
