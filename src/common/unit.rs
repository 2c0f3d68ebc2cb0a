//! Unit conversion utilities.
//!
//! DrawingML expresses lengths in English Metric Units (EMU) and angles in
//! 1/60000ths of a degree. All document-space coordinates in this crate stay
//! in integer EMU; only rotation math drops into floating point.

/// Raw `rot` attribute units per degree.
pub const ROTATION_UNITS_PER_DEGREE: f64 = 60_000.0;

/// Default 16:9 slide size, used when a slide carries no source pictures.
pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 12_192_000;
pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

#[inline]
pub fn rotation_to_degrees(raw: i64) -> f64 {
    raw as f64 / ROTATION_UNITS_PER_DEGREE
}

#[inline]
pub fn rotation_to_radians(raw: i64) -> f64 {
    rotation_to_degrees(raw).to_radians()
}
