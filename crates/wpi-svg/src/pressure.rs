//! Pressure to line attribute mapping.
//!
//! Pressure is averaged over a segment's endpoints and normalized to
//! `[0, 1]`. Width grows linearly with pressure. Gray level follows
//! `1 - sqrt(p)`, so light touches fade toward white and moderate
//! pressure already reads as fairly dark.

use crate::color::Color;

/// Pressure level that maps to full width and black.
pub const MAX_PRESSURE: f64 = 1024.0;

/// Line width at full pressure.
pub const MAX_WIDTH: f64 = 6.0;

/// Gray channel value at zero pressure.
pub const MAX_GRAY: f64 = 254.0;

/// Average two endpoint pressures and normalize into `[0, 1]`.
///
/// Missing samples count as zero pressure.
///
/// # Example
/// ```
/// use wpi_svg::pressure::normalize;
/// assert_eq!(normalize(Some(1024), Some(0)), 0.5);
/// assert_eq!(normalize(None, Some(-40)), 0.0);
/// ```
pub fn normalize(a: Option<i16>, b: Option<i16>) -> f64 {
    let a = f64::from(a.unwrap_or(0));
    let b = f64::from(b.unwrap_or(0));
    (0.5 * (a + b) / MAX_PRESSURE).clamp(0.0, 1.0)
}

/// Line width for a normalized pressure.
pub fn width(p: f64) -> f64 {
    p * MAX_WIDTH
}

/// Gray channel value for a normalized pressure, truncated.
pub fn gray(p: f64) -> u8 {
    ((1.0 - p.sqrt()) * MAX_GRAY) as u8
}

/// Stroke color for a normalized pressure.
pub fn color(p: f64) -> Color {
    Color::gray(gray(p))
}
