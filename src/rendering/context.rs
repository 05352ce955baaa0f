//! Text drawing context
//!
//! Ties the pieces together the way a canvas does: the context carries the
//! current font and alignment, resolves the family through a shared
//! registry, measures, aligns, and emits the outline to a surface.

use crate::font_source::{measure, FontRegistry, TextMetrics};
use crate::rendering::align::{resolve_origin, TextAlign, TextBaseline};
use crate::rendering::emitter::emit_path;
use crate::rendering::surface::DrawingSurface;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// CSS pixels for a size in typographic points (96 px per 72 pt)
fn pt_to_px(pt: f64) -> f64 {
    pt * 4.0 / 3.0
}

/// Font selection: a family name and a size in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 16.0,
        }
    }
}

/// Malformed font shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFontSpec(pub String);

impl fmt::Display for InvalidFontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid font '{}': expected '<size>[px|pt] <family>'",
            self.0
        )
    }
}

impl std::error::Error for InvalidFontSpec {}

impl FromStr for FontSpec {
    type Err = InvalidFontSpec;

    /// Parse `"16px Family Name"`, `"12pt 'Quoted Family'"` or `"20 Family"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidFontSpec(s.to_string());
        let (size, family) = s.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;

        let size = if let Some(px) = size.strip_suffix("px") {
            px.parse::<f64>().map_err(|_| invalid())?
        } else if let Some(pt) = size.strip_suffix("pt") {
            pt_to_px(pt.parse::<f64>().map_err(|_| invalid())?)
        } else {
            size.parse::<f64>().map_err(|_| invalid())?
        };
        if !size.is_finite() || size <= 0.0 {
            return Err(invalid());
        }

        let family = family
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim()
            .to_string();
        if family.is_empty() {
            return Err(invalid());
        }
        Ok(Self { family, size })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Current text state of a drawing context
#[derive(Debug, Clone)]
pub struct TextContext {
    registry: Arc<FontRegistry>,
    pub font: FontSpec,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl TextContext {
    pub fn new(registry: Arc<FontRegistry>) -> Self {
        Self {
            registry,
            font: FontSpec::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
        }
    }

    pub fn registry(&self) -> &Arc<FontRegistry> {
        &self.registry
    }

    /// Set the font from shorthand, keeping the old font if it is malformed
    pub fn set_font(&mut self, shorthand: &str) -> Result<(), InvalidFontSpec> {
        self.font = shorthand.parse()?;
        Ok(())
    }

    /// Measure `text` in the current font.
    ///
    /// Unknown families fall back to the first registered font; an empty
    /// registry or an unloaded font gives placeholder metrics.
    pub fn measure_text(&self, text: &str) -> TextMetrics {
        match self.registry.resolve(&self.font.family) {
            Some(font) => measure(&font, text, self.font.size),
            None => {
                warn!(
                    "No fonts registered; using placeholder metrics for '{}'",
                    self.font.family
                );
                TextMetrics::PLACEHOLDER
            }
        }
    }

    pub fn fill_text<S: DrawingSurface + ?Sized>(&self, surface: &mut S, text: &str, x: f64, y: f64) {
        self.draw_text(surface, text, x, y, true);
    }

    pub fn stroke_text<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
    ) {
        self.draw_text(surface, text, x, y, false);
    }

    fn draw_text<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
        fill: bool,
    ) {
        let Some(font) = self.registry.resolve(&self.font.family) else {
            warn!("No fonts registered; cannot draw '{}'", text);
            return;
        };
        let metrics = measure(&font, text, self.font.size);
        let origin = resolve_origin(x, y, &metrics, self.text_align, self.text_baseline);
        emit_path(&font, text, origin.x, origin.y, self.font.size, fill, surface);
    }
}
