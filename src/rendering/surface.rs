//! Path-command protocol and drawing surfaces
//!
//! Glyph geometry reaches the outside world only through [`DrawingSurface`],
//! the canvas-like subset of operations needed to fill or stroke outlines.

use kurbo::{BezPath, Point, Rect, Shape};
use std::fmt::{self, Write as _};

/// One path-building command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    CubicCurveTo { c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64 },
    ClosePath,
}

impl PathCommand {
    /// Send this command to a surface
    pub fn apply<S: DrawingSurface + ?Sized>(self, surface: &mut S) {
        match self {
            PathCommand::MoveTo { x, y } => surface.move_to(x, y),
            PathCommand::LineTo { x, y } => surface.line_to(x, y),
            PathCommand::QuadraticCurveTo { cx, cy, x, y } => {
                surface.quadratic_curve_to(cx, cy, x, y)
            }
            PathCommand::CubicCurveTo { c1x, c1y, c2x, c2y, x, y } => {
                surface.bezier_curve_to(c1x, c1y, c2x, c2y, x, y)
            }
            PathCommand::ClosePath => surface.close_path(),
        }
    }
}

/// The canvas operations text rendering needs
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// A call made on a [`PathRecorder`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    Path(PathCommand),
    Fill,
    Stroke,
}

impl fmt::Display for SurfaceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceOp::BeginPath => write!(f, "beginPath()"),
            SurfaceOp::Fill => write!(f, "fill()"),
            SurfaceOp::Stroke => write!(f, "stroke()"),
            SurfaceOp::Path(PathCommand::MoveTo { x, y }) => write!(f, "moveTo({x}, {y})"),
            SurfaceOp::Path(PathCommand::LineTo { x, y }) => write!(f, "lineTo({x}, {y})"),
            SurfaceOp::Path(PathCommand::QuadraticCurveTo { cx, cy, x, y }) => {
                write!(f, "quadraticCurveTo({cx}, {cy}, {x}, {y})")
            }
            SurfaceOp::Path(PathCommand::CubicCurveTo { c1x, c1y, c2x, c2y, x, y }) => {
                write!(f, "bezierCurveTo({c1x}, {c1y}, {c2x}, {c2y}, {x}, {y})")
            }
            SurfaceOp::Path(PathCommand::ClosePath) => write!(f, "closePath()"),
        }
    }
}

/// Surface that records every call in order
#[derive(Debug, Default, Clone)]
pub struct PathRecorder {
    pub ops: Vec<SurfaceOp>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded `fill()` or `stroke()` calls
    pub fn paint_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Fill | SurfaceOp::Stroke))
            .count()
    }

    pub fn path_commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Path(command) => Some(*command),
            _ => None,
        })
    }
}

impl DrawingSurface for PathRecorder {
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::Path(PathCommand::MoveTo { x, y }));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::Path(PathCommand::LineTo { x, y }));
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ops
            .push(SurfaceOp::Path(PathCommand::QuadraticCurveTo { cx, cy, x, y }));
    }

    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.ops.push(SurfaceOp::Path(PathCommand::CubicCurveTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        }));
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::Path(PathCommand::ClosePath));
    }

    fn fill(&mut self) {
        self.ops.push(SurfaceOp::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }
}

/// Painting style of an SVG layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Fill,
    Stroke,
}

/// Surface that collects painted paths and writes them out as SVG.
///
/// Each `fill()`/`stroke()` paints the current path as its own `<path>`
/// element, matching how a canvas paints each contour separately.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    current: BezPath,
    painted: Vec<(Paint, BezPath)>,
    pub fill_color: String,
    pub stroke_color: String,
    pub line_width: f64,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            current: BezPath::new(),
            painted: Vec::new(),
            fill_color: "black".to_string(),
            stroke_color: "black".to_string(),
            line_width: 1.0,
        }
    }
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding box of everything painted so far
    pub fn bounds(&self) -> Option<Rect> {
        self.painted
            .iter()
            .map(|(_, path)| path.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    /// Render a standalone SVG document, padded by `margin` on each side
    pub fn to_svg(&self, margin: f64) -> String {
        let bounds = self
            .bounds()
            .unwrap_or(Rect::ZERO)
            .inflate(margin, margin);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height()
        );
        for (paint, path) in &self.painted {
            let style = match paint {
                Paint::Fill => format!(r#"fill="{}""#, self.fill_color),
                Paint::Stroke => format!(
                    r#"fill="none" stroke="{}" stroke-width="{}""#,
                    self.stroke_color, self.line_width
                ),
            };
            let _ = writeln!(svg, r#"  <path {style} d="{}"/>"#, path.to_svg());
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn paint(&mut self, paint: Paint) {
        if !self.current.elements().is_empty() {
            self.painted.push((paint, self.current.clone()));
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn begin_path(&mut self) {
        self.current = BezPath::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.current.move_to(Point::new(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.current.line_to(Point::new(x, y));
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.current.quad_to(Point::new(cx, cy), Point::new(x, y));
    }

    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.current
            .curve_to(Point::new(c1x, c1y), Point::new(c2x, c2y), Point::new(x, y));
    }

    fn close_path(&mut self) {
        self.current.close_path();
    }

    fn fill(&mut self) {
        self.paint(Paint::Fill);
    }

    fn stroke(&mut self) {
        self.paint(Paint::Stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(surface: &mut impl DrawingSurface) {
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(10.0, 0.0);
        surface.line_to(10.0, 10.0);
        surface.close_path();
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut recorder = PathRecorder::new();
        square(&mut recorder);
        recorder.fill();

        assert_eq!(recorder.ops.first(), Some(&SurfaceOp::BeginPath));
        assert_eq!(recorder.ops.last(), Some(&SurfaceOp::Fill));
        assert_eq!(recorder.path_commands().count(), 4);
        assert_eq!(recorder.paint_count(), 1);
    }

    #[test]
    fn commands_apply_to_any_surface() {
        let mut recorder = PathRecorder::new();
        let command = PathCommand::QuadraticCurveTo {
            cx: 1.0,
            cy: 2.0,
            x: 3.0,
            y: 4.0,
        };
        command.apply(&mut recorder);
        assert_eq!(recorder.ops, vec![SurfaceOp::Path(command)]);
        assert_eq!(recorder.ops[0].to_string(), "quadraticCurveTo(1, 2, 3, 4)");
    }

    #[test]
    fn svg_paints_each_path_separately() {
        let mut svg = SvgSurface::new();
        square(&mut svg);
        svg.fill();
        square(&mut svg);
        svg.stroke();
        svg.begin_path();
        svg.fill();

        let document = svg.to_svg(1.0);
        assert_eq!(document.matches("<path").count(), 2);
        assert!(document.contains(r#"fill="none" stroke="black""#));
        assert!(document.contains(r#"viewBox="-1 -1 12 12""#));
    }
}
