//! Stroke renderer trait and canvas traversal.
//!
//! [`render`] walks a decoded [`Canvas`] and calls into a
//! [`StrokeRenderer`]:
//!
//! ```text
//! begin_document
//!   begin_layer "l1"
//!     begin_stroke "s0"
//!       segment ...      (one per consecutive point pair)
//!     end_stroke
//!   end_layer
//! end_document
//! ```
//!
//! Layers and strokes are visited in stored order.

use std::io;

use wpi::{Canvas, Point};

use crate::color::Color;
use crate::pressure;

/// Fixed output canvas width.
pub const CANVAS_WIDTH: u32 = 2828;

/// Fixed output canvas height.
pub const CANVAS_HEIGHT: u32 = 4000;

/// A styled line between two consecutive stroke points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (i16, i16),
    pub to: (i16, i16),
    pub width: f64,
    pub color: Color,
}

impl Segment {
    /// Derive the segment between `a` and `b` from their average pressure.
    pub fn between(a: &Point, b: &Point) -> Self {
        let p = pressure::normalize(a.pressure, b.pressure);
        Self {
            from: (a.x, a.y),
            to: (b.x, b.y),
            width: pressure::width(p),
            color: pressure::color(p),
        }
    }
}

/// Trait for stroke output targets.
///
/// Implement this trait to send decoded strokes somewhere other than SVG.
pub trait StrokeRenderer {
    /// Start the document with the given canvas size.
    fn begin_document(&mut self, width: u32, height: u32) -> io::Result<()>;

    /// Finish the document.
    fn end_document(&mut self) -> io::Result<()>;

    /// Open a layer group.
    fn begin_layer(&mut self, name: &str) -> io::Result<()>;

    /// Close the current layer group.
    fn end_layer(&mut self) -> io::Result<()>;

    /// Open a stroke group inside the current layer.
    fn begin_stroke(&mut self, name: &str) -> io::Result<()>;

    /// Close the current stroke group.
    fn end_stroke(&mut self) -> io::Result<()>;

    /// Draw one segment of the current stroke.
    fn segment(&mut self, segment: &Segment) -> io::Result<()>;
}

/// Render a decoded canvas using the given renderer.
///
/// # Errors
///
/// Returns the first error reported by the renderer.
pub fn render<R: StrokeRenderer>(canvas: &Canvas, renderer: &mut R) -> io::Result<()> {
    renderer.begin_document(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    for layer in canvas.layers() {
        renderer.begin_layer(layer.name())?;
        for (i, stroke) in layer.strokes().iter().enumerate() {
            renderer.begin_stroke(&format!("s{i}"))?;
            if stroke.segment_count() == 0 {
                log::trace!("{}/s{i}: {} points, nothing to draw", layer.name(), stroke.len());
            }
            for (a, b) in stroke.segments() {
                renderer.segment(&Segment::between(a, b))?;
            }
            renderer.end_stroke()?;
        }
        renderer.end_layer()?;
    }

    renderer.end_document()
}
