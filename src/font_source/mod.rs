//! Font sources, loading, and measurement
//!
//! Everything about getting a font from its bytes to something text can be
//! measured and outlined with: source decoding, the parsed font wrapper,
//! the per-font load state machine, and the family registry.

pub mod error;
pub mod metrics;
pub mod parsed;
pub mod registry;
pub mod resource;
pub mod source;

// Explicit re-exports for public API
pub use error::FontLoadError;
pub use metrics::{measure, measure_parsed, FontMetrics, TextMetrics};
pub use parsed::{Glyph, ParsedFont};
pub use registry::{FontHandle, FontRegistry};
pub use resource::{FontDescriptor, FontResource, LoadState};
pub use source::FontSource;

/// Shared font fixture for unit tests
#[cfg(test)]
pub(crate) mod test_fonts {
    use super::{FontSource, ParsedFont};
    use std::sync::Arc;

    pub const MONO: &[u8] = include_bytes!("../../tests/fonts/DejaVuSansMono.ttf");

    pub fn mono_source() -> FontSource {
        FontSource::from_bytes(MONO)
    }

    pub fn parsed_mono() -> ParsedFont {
        ParsedFont::from_bytes(Arc::from(MONO)).unwrap()
    }
}
