//! Font loading errors
//!
//! Only load-time failures live here. A font that is missing or still
//! loading when text is measured or drawn is not an error: those paths
//! log a warning and degrade (see `metrics` and `rendering::emitter`).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by `FontResource::load_sync` / `FontResource::load_async`.
#[derive(Debug)]
pub enum FontLoadError {
    /// The source is not a usable path, data URI or byte buffer.
    InvalidSourceData { reason: String },
    /// The bytes could not be interpreted as a font.
    ParseFailure { family: String, reason: String },
    /// The font file could not be read.
    IoFailure { path: PathBuf, source: io::Error },
    /// Another load of the same resource is already running.
    LoadInProgress { family: String },
}

impl FontLoadError {
    pub(crate) fn parse(family: &str, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            family: family.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSourceData {
            reason: reason.into(),
        }
    }

    /// Whether this is a `ParseFailure`
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseFailure { .. })
    }
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSourceData { reason } => write!(f, "invalid font source: {reason}"),
            Self::ParseFailure { family, reason } => {
                write!(f, "failed to parse font '{family}': {reason}")
            }
            Self::IoFailure { path, source } => {
                write!(f, "failed to read font file {}: {source}", path.display())
            }
            Self::LoadInProgress { family } => {
                write!(f, "font '{family}' is already being loaded")
            }
        }
    }
}

impl std::error::Error for FontLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_failure_keeps_its_cause() {
        let error = FontLoadError::IoFailure {
            path: PathBuf::from("missing.ttf"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("missing.ttf"));
    }

    #[test]
    fn parse_failure_names_the_family() {
        let error = FontLoadError::parse("B", "no tables");
        assert!(error.is_parse_failure());
        assert_eq!(error.to_string(), "failed to parse font 'B': no tables");
    }
}
