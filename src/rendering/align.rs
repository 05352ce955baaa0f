//! Text alignment
//!
//! Maps a requested anchor point and canvas-style alignment modes to the
//! origin the outline is actually drawn from. Pure arithmetic on metrics
//! that were already measured.

use crate::font_source::TextMetrics;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment relative to the anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    End,
    Right,
    Center,
}

/// Vertical alignment relative to the anchor y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// Unrecognized alignment keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlignment(pub String);

impl fmt::Display for UnknownAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown alignment '{}'", self.0)
    }
}

impl std::error::Error for UnknownAlignment {}

impl TextAlign {
    pub const ALL: [TextAlign; 5] = [
        TextAlign::Start,
        TextAlign::Left,
        TextAlign::End,
        TextAlign::Right,
        TextAlign::Center,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Left => "left",
            TextAlign::End => "end",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
        }
    }

    /// Adjusted x for text of the given width
    pub fn resolve_x(self, x: f64, width: f64) -> f64 {
        match self {
            TextAlign::Start | TextAlign::Left => x,
            TextAlign::End | TextAlign::Right => x - width,
            TextAlign::Center => x - width / 2.0,
        }
    }
}

impl TextBaseline {
    pub const ALL: [TextBaseline; 4] = [
        TextBaseline::Alphabetic,
        TextBaseline::Top,
        TextBaseline::Middle,
        TextBaseline::Bottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }

    /// Adjusted baseline y for the given metrics
    pub fn resolve_y(self, y: f64, metrics: &TextMetrics) -> f64 {
        match self {
            TextBaseline::Alphabetic => y,
            TextBaseline::Top => y + metrics.em_height_ascent,
            TextBaseline::Middle => {
                y + (metrics.em_height_ascent + metrics.em_height_descent) / 2.0
            }
            TextBaseline::Bottom => y + metrics.em_height_descent,
        }
    }
}

impl FromStr for TextAlign {
    type Err = UnknownAlignment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|align| align.name() == wanted)
            .ok_or_else(|| UnknownAlignment(s.to_string()))
    }
}

impl FromStr for TextBaseline {
    type Err = UnknownAlignment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|baseline| baseline.name() == wanted)
            .ok_or_else(|| UnknownAlignment(s.to_string()))
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Origin to draw from so that the text sits at `(x, y)` under the given
/// alignment modes.
pub fn resolve_origin(
    x: f64,
    y: f64,
    metrics: &TextMetrics,
    align: TextAlign,
    baseline: TextBaseline,
) -> Point {
    Point::new(align.resolve_x(x, metrics.width), baseline.resolve_y(y, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: TextMetrics = TextMetrics {
        width: 120.0,
        em_height_ascent: 15.0,
        em_height_descent: -5.0,
    };

    #[test]
    fn horizontal_modes() {
        let x = |align| resolve_origin(200.0, 0.0, &METRICS, align, TextBaseline::Alphabetic).x;
        assert_eq!(x(TextAlign::Start), 200.0);
        assert_eq!(x(TextAlign::Left), 200.0);
        assert_eq!(x(TextAlign::End), 80.0);
        assert_eq!(x(TextAlign::Right), 200.0 - METRICS.width);
        assert_eq!(x(TextAlign::Center), 200.0 - METRICS.width / 2.0);
    }

    #[test]
    fn vertical_modes() {
        let y = |baseline| resolve_origin(0.0, 100.0, &METRICS, TextAlign::Start, baseline).y;
        assert_eq!(y(TextBaseline::Alphabetic), 100.0);
        assert_eq!(y(TextBaseline::Top), 115.0);
        assert_eq!(y(TextBaseline::Middle), 105.0);
        assert_eq!(y(TextBaseline::Bottom), 95.0);
    }

    #[test]
    fn defaults_are_start_and_alphabetic() {
        assert_eq!(TextAlign::default(), TextAlign::Start);
        assert_eq!(TextBaseline::default(), TextBaseline::Alphabetic);
    }

    #[test]
    fn parses_canvas_keywords() {
        assert_eq!("center".parse::<TextAlign>(), Ok(TextAlign::Center));
        assert_eq!(" Right ".parse::<TextAlign>(), Ok(TextAlign::Right));
        assert_eq!("middle".parse::<TextBaseline>(), Ok(TextBaseline::Middle));
        assert!("hanging".parse::<TextBaseline>().is_err());
    }
}
