//! Font source data
//!
//! A font can be registered from a file path, a `data:` URI or a raw byte
//! buffer. Decoding a data URI is plain in-memory work; only paths need I/O.

use crate::font_source::error::FontLoadError;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

const DATA_URI_PREFIX: &str = "data:";

/// Where a font's bytes come from
#[derive(Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A file on disk, read when the font is loaded
    Path(PathBuf),
    /// A `data:[<mediatype>][;base64],<payload>` URI
    DataUri(String),
    /// Font bytes already in memory
    Bytes(Arc<[u8]>),
}

impl FontSource {
    /// Classify a string source: `data:` prefix is a data URI, anything
    /// else is a file path.
    pub fn from_string(source: impl Into<String>) -> Self {
        let source = source.into();
        if source.starts_with(DATA_URI_PREFIX) {
            Self::DataUri(source)
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Short description for logs (never the full payload)
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::DataUri(uri) => {
                let header = uri.split(',').next().unwrap_or(DATA_URI_PREFIX);
                format!("{header},... ({} chars)", uri.len())
            }
            Self::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }

    /// The file path to read, if this source needs I/O
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path.as_path()),
            _ => None,
        }
    }

    /// Reject sources that can never produce bytes, before any I/O.
    pub(crate) fn validate(&self) -> Result<(), FontLoadError> {
        match self {
            Self::Path(path) if path.as_os_str().is_empty() => {
                Err(FontLoadError::invalid("empty font path"))
            }
            Self::DataUri(uri)
                if uri
                    .strip_prefix(DATA_URI_PREFIX)
                    .is_none_or(|rest| !rest.contains(',')) =>
            {
                Err(FontLoadError::invalid("data URI has no ',' before its payload"))
            }
            _ => Ok(()),
        }
    }

    /// Bytes for in-memory sources. Paths return `None`; the caller reads
    /// them with blocking or async I/O.
    pub(crate) fn in_memory_bytes(&self, family: &str) -> Option<Result<Arc<[u8]>, FontLoadError>> {
        match self {
            Self::Path(_) => None,
            Self::Bytes(bytes) => Some(Ok(Arc::clone(bytes))),
            Self::DataUri(uri) => Some(decode_data_uri(uri, family).map(Arc::from)),
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::DataUri(_) | Self::Bytes(_) => {
                write!(f, "{}", self.describe())
            }
        }
    }
}

impl FromStr for FontSource {
    type Err = FontLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = Self::from_string(s);
        source.validate()?;
        Ok(source)
    }
}

impl From<&str> for FontSource {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl From<String> for FontSource {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<PathBuf> for FontSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Arc::from(value.into_boxed_slice()))
    }
}

// Config files carry sources as plain strings.
impl Serialize for FontSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Path(path) => serializer.serialize_str(&path.to_string_lossy()),
            Self::DataUri(uri) => serializer.serialize_str(uri),
            Self::Bytes(bytes) => {
                let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
                serializer.serialize_str(&format!("data:font/ttf;base64,{payload}"))
            }
        }
    }
}

// Not validated here: a bad source fails its own load, not the whole file.
impl<'de> Deserialize<'de> for FontSource {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_string)
    }
}

/// Decode the payload after the first comma of a data URI.
///
/// Base64 payloads that fail to decode are malformed font data, so they
/// surface as `ParseFailure` for the family being loaded.
fn decode_data_uri(uri: &str, family: &str) -> Result<Vec<u8>, FontLoadError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| FontLoadError::invalid("URI does not start with 'data:'"))?;
    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| FontLoadError::invalid("data URI has no ',' before its payload"))?;

    let is_base64 = metadata
        .split(';')
        .skip(1)
        .any(|param| param.trim().eq_ignore_ascii_case("base64"));

    if is_base64 {
        let cleaned: Vec<u8> = payload
            .bytes()
            .filter(|byte| !byte.is_ascii_whitespace())
            .collect();
        base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .map_err(|e| FontLoadError::parse(family, format!("invalid base64 payload: {e}")))
    } else {
        percent_decode(payload)
            .ok_or_else(|| FontLoadError::parse(family, "invalid percent-escape in data URI"))
    }
}

fn percent_decode(input: &str) -> Option<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hi = (hex[0] as char).to_digit(16)?;
            let lo = (hex[1] as char).to_digit(16)?;
            out.push(((hi << 4) | lo) as u8);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Some(out)
}
