//! Decoded document model.
//!
//! # Hierarchy
//!
//! ```text
//! Canvas
//! └── Layer "l1", "l2", ...
//!     └── Stroke
//!         └── Point { x, y, pressure?, tilt? }
//! ```
//!
//! The stream carries positions, pressures and tilts as separate blocks.
//! They are paired by order of arrival within a stroke: the k-th pressure
//! sample belongs to the k-th position sample, and likewise for tilt.
//! Samples that arrive ahead of their position are held back until the
//! point exists.

use std::collections::VecDeque;

/// Pen tilt magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tilt {
    pub x: u8,
    pub y: u8,
}

impl Tilt {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A sampled pen position, already in output units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i16,
    pub y: i16,
    pub pressure: Option<i16>,
    pub tilt: Option<Tilt>,
}

impl Point {
    /// A bare position with no pressure or tilt attached.
    pub const fn new(x: i16, y: i16) -> Self {
        Self {
            x,
            y,
            pressure: None,
            tilt: None,
        }
    }
}

/// A continuous pen movement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    pressures_seen: usize,
    tilts_seen: usize,
    pending_pressure: VecDeque<i16>,
    pending_tilt: VecDeque<Tilt>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position sample.
    ///
    /// Pressure or tilt samples that arrived before this position are
    /// attached to it.
    pub fn push_position(&mut self, x: i16, y: i16) {
        let mut point = Point::new(x, y);
        point.pressure = self.pending_pressure.pop_front();
        point.tilt = self.pending_tilt.pop_front();
        self.points.push(point);
    }

    /// Record the next pressure sample.
    pub fn push_pressure(&mut self, pressure: i16) {
        let index = self.pressures_seen;
        self.pressures_seen += 1;
        match self.points.get_mut(index) {
            Some(point) => point.pressure = Some(pressure),
            None => self.pending_pressure.push_back(pressure),
        }
    }

    /// Record the next tilt sample.
    pub fn push_tilt(&mut self, tilt: Tilt) {
        let index = self.tilts_seen;
        self.tilts_seen += 1;
        match self.points.get_mut(index) {
            Some(point) => point.tilt = Some(tilt),
            None => self.pending_tilt.push_back(tilt),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of line segments between consecutive points.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// A named group of strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    strokes: Vec<Stroke>,
}

impl Layer {
    /// Create the layer at 1-based position `index`.
    pub fn numbered(index: usize) -> Self {
        Self {
            name: format!("l{index}"),
            strokes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Start a new stroke and return it.
    pub fn begin_stroke(&mut self) -> &mut Stroke {
        self.strokes.push(Stroke::new());
        let last = self.strokes.len() - 1;
        &mut self.strokes[last]
    }

    pub(crate) fn last_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut()
    }
}

/// Root of a decoded document.
///
/// A canvas always holds at least one layer; the format does not
/// guarantee a layer marker before the first stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    layers: Vec<Layer>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::numbered(1)],
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Open a new layer after the existing ones and return it.
    pub fn begin_layer(&mut self) -> &mut Layer {
        let index = self.layers.len() + 1;
        self.layers.push(Layer::numbered(index));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// The layer new strokes are added to.
    pub fn current_layer_mut(&mut self) -> &mut Layer {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn stroke_count(&self) -> usize {
        self.layers.iter().map(|l| l.strokes.len()).sum()
    }

    pub fn point_count(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|l| l.strokes.iter())
            .map(Stroke::len)
            .sum()
    }
}
