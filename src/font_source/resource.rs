//! Font resources and their loading state machine
//!
//! A resource moves `Unloaded -> Loading -> Loaded | Failed` once per load
//! attempt. The sync and async entry points share the same transitions;
//! they differ only in how a file path is read.

use crate::font_source::error::FontLoadError;
use crate::font_source::parsed::ParsedFont;
use crate::font_source::source::FontSource;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Descriptive attributes stored with a font.
///
/// These are metadata only: the registry resolves fonts by family alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    pub weight: String,
    pub style: String,
    pub variant: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            weight: "normal".to_string(),
            style: "normal".to_string(),
            variant: "normal".to_string(),
        }
    }
}

/// Loading state of a resource. The parsed font only exists once loaded.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Arc<ParsedFont>),
    Failed(String),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

/// One registered font: where it comes from and whether it is usable yet
#[derive(Debug)]
pub struct FontResource {
    family: String,
    source: FontSource,
    descriptor: FontDescriptor,
    state: RwLock<LoadState>,
    /// Held for the duration of a load so one resource is parsed at most
    /// once at a time.
    in_flight: tokio::sync::Mutex<()>,
    attempts: AtomicUsize,
}

impl FontResource {
    pub fn new(family: impl Into<String>, source: FontSource, descriptor: FontDescriptor) -> Self {
        Self {
            family: family.into(),
            source,
            descriptor,
            state: RwLock::new(LoadState::Unloaded),
            in_flight: tokio::sync::Mutex::new(()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LoadState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.parsed().is_some()
    }

    /// Number of load attempts that actually fetched and parsed data
    pub fn load_attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// The parsed font, present only while `Loaded`
    pub fn parsed(&self) -> Option<Arc<ParsedFont>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Loaded(font) => Some(Arc::clone(font)),
            _ => None,
        }
    }

    fn set_state(&self, next: LoadState) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        debug!(
            "Font '{}' state {} -> {}",
            self.family,
            state.label(),
            next.label()
        );
        *state = next;
    }

    /// Load the font, blocking on file I/O.
    ///
    /// Returns immediately if already loaded. Outside a tokio runtime a
    /// load already in flight is waited for. Inside a runtime blocking is
    /// not allowed, so a running load gives `LoadInProgress` instead.
    pub fn load_sync(&self) -> Result<&Self, FontLoadError> {
        let _guard = if tokio::runtime::Handle::try_current().is_err() {
            self.in_flight.blocking_lock()
        } else {
            self.in_flight
                .try_lock()
                .map_err(|_| FontLoadError::LoadInProgress {
                    family: self.family.clone(),
                })?
        };
        if self.is_loaded() {
            return Ok(self);
        }

        self.begin_load()?;
        let bytes = match self.source.in_memory_bytes(&self.family) {
            Some(bytes) => bytes,
            None => self.read_path_blocking(),
        };
        self.finish_load(bytes)?;
        Ok(self)
    }

    /// Load the font without blocking the caller on file I/O.
    ///
    /// Concurrent calls on the same resource wait for the one in flight;
    /// once it succeeds they return without parsing again. The returned
    /// future resolves exactly once.
    pub async fn load_async(&self) -> Result<(), FontLoadError> {
        let _guard = self.in_flight.lock().await;
        if self.is_loaded() {
            return Ok(());
        }

        self.begin_load()?;
        let bytes = match self.source.in_memory_bytes(&self.family) {
            Some(bytes) => bytes,
            None => self.read_path_async().await,
        };
        self.finish_load(bytes)
    }

    fn begin_load(&self) -> Result<(), FontLoadError> {
        if let Err(error) = self.source.validate() {
            self.set_state(LoadState::Failed(error.to_string()));
            return Err(error);
        }
        self.attempts.fetch_add(1, Ordering::Relaxed);
        self.set_state(LoadState::Loading);
        Ok(())
    }

    fn read_path_blocking(&self) -> Result<Arc<[u8]>, FontLoadError> {
        let path = self.source.path().unwrap_or_else(|| std::path::Path::new(""));
        std::fs::read(path)
            .map(Arc::from)
            .map_err(|source| FontLoadError::IoFailure {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn read_path_async(&self) -> Result<Arc<[u8]>, FontLoadError> {
        let path = self.source.path().unwrap_or_else(|| std::path::Path::new(""));
        tokio::fs::read(path)
            .await
            .map(Arc::from)
            .map_err(|source| FontLoadError::IoFailure {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse fetched bytes and move to the terminal state for this attempt.
    fn finish_load(&self, bytes: Result<Arc<[u8]>, FontLoadError>) -> Result<(), FontLoadError> {
        let parsed = bytes.and_then(|bytes| {
            ParsedFont::from_bytes(bytes)
                .map_err(|e| FontLoadError::parse(&self.family, e.to_string()))
        });

        match parsed {
            Ok(font) => {
                info!(
                    "Loaded font '{}' from {} (units per em: {})",
                    self.family,
                    self.source.describe(),
                    font.units_per_em()
                );
                self.set_state(LoadState::Loaded(Arc::new(font)));
                Ok(())
            }
            Err(error) => {
                warn!("Failed to load font '{}': {}", self.family, error);
                self.set_state(LoadState::Failed(error.to_string()));
                Err(error)
            }
        }
    }
}
