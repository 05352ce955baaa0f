//! Font metrics and text measurement
//!
//! Design-unit metrics come from the parsed font; text metrics are derived
//! from them per call and expressed in the same units as the requested
//! font size (pixels).

use crate::font_source::parsed::ParsedFont;
use crate::font_source::resource::FontResource;
use serde::Serialize;
use tracing::warn;

/// Font-global vertical metrics in design units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
    pub line_height: f64,
}

impl FontMetrics {
    /// Extract metrics from a parsed font
    pub fn from_parsed(font: &ParsedFont) -> Self {
        let ascender = f64::from(font.ascender());
        let descender = f64::from(font.descender());
        Self {
            units_per_em: f64::from(font.units_per_em()),
            ascender,
            descender,
            line_height: ascender - descender,
        }
    }

    /// Convert a design-unit length to output units at `size`
    pub fn scale(&self, value: f64, size: f64) -> f64 {
        value / self.units_per_em * size
    }
}

/// Measured extent of a string at a given size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    /// Sum of glyph advances
    pub width: f64,
    /// Font ascender, positive above the baseline
    pub em_height_ascent: f64,
    /// Font descender as stored by the font, negative below the baseline
    pub em_height_descent: f64,
}

impl TextMetrics {
    /// Returned when no usable font is available, so layout can continue.
    pub const PLACEHOLDER: TextMetrics = TextMetrics {
        width: 10.0,
        em_height_ascent: 8.0,
        em_height_descent: 2.0,
    };
}

/// Measure `text` with a parsed font at `size`.
///
/// Width is the plain sum of per-glyph advances; no kerning or ligatures.
pub fn measure_parsed(font: &ParsedFont, text: &str, size: f64) -> TextMetrics {
    let metrics = FontMetrics::from_parsed(font);
    let total_advance: f64 = font
        .string_to_glyphs(text)
        .iter()
        .map(|glyph| f64::from(glyph.advance_width))
        .sum();

    TextMetrics {
        width: metrics.scale(total_advance, size),
        em_height_ascent: metrics.scale(metrics.ascender, size),
        em_height_descent: metrics.scale(metrics.descender, size),
    }
}

/// Measure `text` with a font resource.
///
/// A resource that is not loaded yet (or failed to load) yields
/// [`TextMetrics::PLACEHOLDER`] and a warning instead of an error.
pub fn measure(font: &FontResource, text: &str, size: f64) -> TextMetrics {
    match font.parsed() {
        Some(parsed) => measure_parsed(&parsed, text, size),
        None => {
            warn!(
                "Font '{}' is not loaded; using placeholder metrics",
                font.family()
            );
            TextMetrics::PLACEHOLDER
        }
    }
}
