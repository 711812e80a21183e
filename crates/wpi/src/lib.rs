//! # wpi - WPI pen-capture decoding
//!
//! WPI files start with an opaque header of [`HEADER_LEN`] bytes followed
//! by a stream of tagged blocks. This crate turns that stream into a
//! [`Canvas`] of layers, strokes and points.
//!
//! ## Example
//!
//! ```ignore
//! use wpi::{decode_file, HEADER_LEN};
//!
//! let canvas = decode_file("sketch.wpi", HEADER_LEN)?;
//! for layer in canvas.layers() {
//!     println!("{}: {} strokes", layer.name(), layer.strokes().len());
//! }
//! ```

pub mod block;
pub mod decode;
pub mod error;
pub mod model;

pub use block::{Block, Control, HEADER_LEN, OFFSET_X, read_block, transform_position};
pub use decode::{DecodeStats, Decoder, decode, decode_file};
pub use error::{DecodeError, DecodeErrorKind, OpenError};
pub use model::{Canvas, Layer, Point, Stroke, Tilt};
