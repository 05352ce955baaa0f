//! Parsed font data wrapper around `ttf-parser`
//!
//! Binary table parsing belongs to `ttf-parser`. This wrapper keeps the
//! bytes, caches the global metrics, and answers the handful of questions
//! text rendering asks: which glyphs make up a string, how wide they are,
//! and what their outlines look like at a given size and origin.

use kurbo::{BezPath, Point};
use std::fmt;
use std::sync::Arc;
use ttf_parser::{GlyphId, OutlineBuilder};

/// One glyph of a string, resolved through the font's cmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub id: u16,
    pub codepoint: char,
    /// Horizontal advance in font design units
    pub advance_width: u16,
}

/// A successfully parsed font
#[derive(Clone)]
pub struct ParsedFont {
    bytes: Arc<[u8]>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    family_name: Option<String>,
}

impl ParsedFont {
    /// Parse font bytes, keeping them for later glyph queries.
    pub fn from_bytes(bytes: Arc<[u8]>) -> Result<Self, ttf_parser::FaceParsingError> {
        let face = ttf_parser::Face::parse(&bytes, 0)?;
        let family_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|name| name.to_string());
        Ok(Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            family_name,
            bytes,
        })
    }

    /// Re-create a `Face` for a query. The bytes were validated in
    /// `from_bytes`, so this only fails if that invariant is broken.
    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.bytes, 0).ok()
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Font-global ascender in design units (positive, above baseline)
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    /// Font-global descender in design units (negative, below baseline)
    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Family name from the font's own `name` table, if it has one
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Scale factor from design units to output units at `size`
    pub fn scale(&self, size: f64) -> f64 {
        size / f64::from(self.units_per_em)
    }

    /// Map each character of `text` to a glyph.
    ///
    /// Characters the font has no mapping for become glyph 0 (`.notdef`),
    /// which still advances the pen.
    pub fn string_to_glyphs(&self, text: &str) -> Vec<Glyph> {
        match self.face() {
            Some(face) => glyphs_in(&face, text).collect(),
            None => Vec::new(),
        }
    }

    /// Outline of `text` laid out on a baseline at `(x, y)`, scaled to `size`.
    ///
    /// Output coordinates are y-down: font-space y is flipped so glyphs sit
    /// above the baseline on a canvas-like surface. Glyphs are placed by
    /// summed advance widths, nothing else.
    pub fn get_path(&self, text: &str, x: f64, y: f64, size: f64) -> BezPath {
        let mut builder = PathBuilder {
            path: BezPath::new(),
            origin_x: x,
            origin_y: y,
            scale: self.scale(size),
        };
        let Some(face) = self.face() else {
            return builder.path;
        };

        for glyph in glyphs_in(&face, text) {
            // Glyphs without an outline (spaces) still advance.
            let _ = face.outline_glyph(GlyphId(glyph.id), &mut builder);
            builder.origin_x += f64::from(glyph.advance_width) * builder.scale;
        }
        builder.path
    }
}

impl fmt::Debug for ParsedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFont")
            .field("family_name", &self.family_name)
            .field("units_per_em", &self.units_per_em)
            .field("ascender", &self.ascender)
            .field("descender", &self.descender)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

fn glyphs_in<'a>(face: &'a ttf_parser::Face<'a>, text: &'a str) -> impl Iterator<Item = Glyph> + 'a {
    text.chars().map(move |codepoint| {
        let id = face.glyph_index(codepoint).unwrap_or(GlyphId(0));
        Glyph {
            id: id.0,
            codepoint,
            advance_width: face.glyph_hor_advance(id).unwrap_or(0),
        }
    })
}

/// Collects `ttf-parser` outline callbacks into a positioned `BezPath`.
struct PathBuilder {
    path: BezPath,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl PathBuilder {
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin_x + f64::from(x) * self.scale,
            self.origin_y - f64::from(y) * self.scale,
        )
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.point(x1, y1), self.point(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.path.curve_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
