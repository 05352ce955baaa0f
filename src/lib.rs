//! glyphpath
//!
//! Font registration, loading, measurement, and glyph outlines emitted as
//! canvas-style path commands.
pub mod core;
pub mod font_source;
pub mod logging;
pub mod rendering;
#[cfg(test)]
mod tests;
