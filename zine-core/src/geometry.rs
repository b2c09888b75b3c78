//! Geometry primitives: percentage rectangles and physical unit conversion.

use serde::{Deserialize, Serialize};

/// Pixels per inch used for unit conversion (CSS reference pixel).
pub const PX_PER_INCH: f32 = 96.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// Conversion factor from millimeters to pixels at 96 DPI.
pub const MM_TO_PX_RATIO: f32 = PX_PER_INCH / MM_PER_INCH;

/// Physical unit for page dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters.
    Mm,
    /// CSS pixels (96 DPI).
    Px,
    /// Inches.
    In,
}

impl Unit {
    /// Lenient parse for imported payloads: unrecognized strings fall back to
    /// millimeters rather than failing the whole import.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "px" => Self::Px,
            "in" => Self::In,
            _ => Self::Mm,
        }
    }
}

/// Convert millimeters to pixels.
#[must_use]
pub fn mm_to_px(mm: f32) -> f32 {
    mm * MM_TO_PX_RATIO
}

/// Convert pixels to millimeters.
#[must_use]
pub fn px_to_mm(px: f32) -> f32 {
    px / MM_TO_PX_RATIO
}

/// Convert a value in the given unit to pixels.
#[must_use]
pub fn to_px(value: f32, unit: Unit) -> f32 {
    match unit {
        Unit::Mm => mm_to_px(value),
        Unit::Px => value,
        Unit::In => value * PX_PER_INCH,
    }
}

/// Convert a value in the given unit to millimeters.
#[must_use]
pub fn to_mm(value: f32, unit: Unit) -> f32 {
    match unit {
        Unit::Mm => value,
        Unit::Px => px_to_mm(value),
        Unit::In => value * MM_PER_INCH,
    }
}

/// A rectangle positioned in percentages (0-100) of the page content area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge, percent of content width.
    pub x: f32,
    /// Top edge, percent of content height.
    pub y: f32,
    /// Width, percent of content width.
    pub width: f32,
    /// Height, percent of content height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from percentage coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Page dimensions scaled to fit a display area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledDimensions {
    /// Scaled width in pixels.
    pub width_px: f32,
    /// Scaled height in pixels.
    pub height_px: f32,
    /// Applied scale factor (1.0 when no downscaling was needed).
    pub scale: f32,
}

/// Scale page dimensions to fit within `max_width` pixels.
///
/// Converts to pixels first; only downscales, never enlarges.
#[must_use]
pub fn scaled_dimensions(width: f32, height: f32, unit: Unit, max_width: f32) -> ScaledDimensions {
    let width_px = to_px(width, unit);
    let height_px = to_px(height, unit);
    let scale = if width_px > max_width {
        max_width / width_px
    } else {
        1.0
    };
    ScaledDimensions {
        width_px: width_px * scale,
        height_px: height_px * scale,
        scale,
    }
}
