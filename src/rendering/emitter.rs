//! Glyph outline emitter
//!
//! Walks a string's outline and replays it on a [`DrawingSurface`]. Every
//! contour is closed and painted on its own, then a fresh path is begun,
//! so counters (the hole in "O") are painted by the surface's fill rule
//! one contour at a time.

use crate::font_source::{FontResource, ParsedFont};
use crate::rendering::surface::{DrawingSurface, PathCommand};
use kurbo::{BezPath, PathEl};
use tracing::warn;

/// Convert an outline into path commands, in order
pub fn path_commands(path: &BezPath) -> impl Iterator<Item = PathCommand> + '_ {
    path.elements().iter().map(|el| match *el {
        PathEl::MoveTo(p) => PathCommand::MoveTo { x: p.x, y: p.y },
        PathEl::LineTo(p) => PathCommand::LineTo { x: p.x, y: p.y },
        PathEl::QuadTo(c, p) => PathCommand::QuadraticCurveTo {
            cx: c.x,
            cy: c.y,
            x: p.x,
            y: p.y,
        },
        PathEl::CurveTo(c1, c2, p) => PathCommand::CubicCurveTo {
            c1x: c1.x,
            c1y: c1.y,
            c2x: c2.x,
            c2y: c2.y,
            x: p.x,
            y: p.y,
        },
        PathEl::ClosePath => PathCommand::ClosePath,
    })
}

/// Replay `path` on `surface`, painting each closed contour.
///
/// `begin_path` is issued once up front and again after every paint.
pub fn emit_outline<S: DrawingSurface + ?Sized>(path: &BezPath, fill: bool, surface: &mut S) {
    surface.begin_path();
    for command in path_commands(path) {
        command.apply(surface);
        if command == PathCommand::ClosePath {
            if fill {
                surface.fill();
            } else {
                surface.stroke();
            }
            surface.begin_path();
        }
    }
}

/// Draw `text` with an already parsed font, baseline origin at `(x, y)`.
pub fn emit_parsed<S: DrawingSurface + ?Sized>(
    font: &ParsedFont,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
    fill: bool,
    surface: &mut S,
) {
    let outline = font.get_path(text, x, y, size);
    emit_outline(&outline, fill, surface);
}

/// Draw `text` with a font resource.
///
/// If the font is not loaded this only logs a warning; nothing is drawn.
pub fn emit_path<S: DrawingSurface + ?Sized>(
    font: &FontResource,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
    fill: bool,
    surface: &mut S,
) {
    match font.parsed() {
        Some(parsed) => emit_parsed(&parsed, text, x, y, size, fill, surface),
        None => warn!("Font '{}' is not loaded; skipping text", font.family()),
    }
}
