//! Text rendering
//!
//! This module turns fonts into drawing:
//! - Alignment of an anchor point against measured text
//! - The path-command protocol and the surfaces that consume it
//! - The outline emitter that paints one contour at a time
//! - A canvas-like text context tying it all together

pub mod align;
pub mod context;
pub mod emitter;
pub mod surface;

// Re-export commonly used items
pub use align::{resolve_origin, TextAlign, TextBaseline, UnknownAlignment};
pub use context::{FontSpec, InvalidFontSpec, TextContext};
pub use emitter::{emit_outline, emit_parsed, emit_path, path_commands};
pub use surface::{DrawingSurface, PathCommand, PathRecorder, SurfaceOp, SvgSurface};
