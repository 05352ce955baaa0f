//! Font registry
//!
//! Maps family names to font resources. A registry is an ordinary value:
//! share it with `Arc` between the contexts that draw with it.

use crate::font_source::error::FontLoadError;
use crate::font_source::resource::{FontDescriptor, FontResource};
use crate::font_source::source::FontSource;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Shared handle to a registered font
pub type FontHandle = Arc<FontResource>;

#[derive(Default)]
struct RegistryInner {
    fonts: HashMap<String, FontHandle>,
    /// Families in first-registration order
    order: Vec<String>,
}

/// Family name -> font resource, last registration wins
#[derive(Default)]
pub struct FontRegistry {
    inner: RwLock<RegistryInner>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font under `family`, replacing any earlier entry.
    ///
    /// Nothing is read or parsed here; call one of the load methods on the
    /// returned handle.
    pub fn register(
        &self,
        source: impl Into<FontSource>,
        family: impl Into<String>,
        descriptor: FontDescriptor,
    ) -> FontHandle {
        let family = family.into();
        let handle = Arc::new(FontResource::new(family.clone(), source.into(), descriptor));

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.fonts.insert(family.clone(), Arc::clone(&handle)).is_some() {
            debug!("Replaced registered font '{}'", family);
        } else {
            debug!("Registered font '{}'", family);
            inner.order.push(family);
        }
        handle
    }

    /// Exact lookup, no fallback
    pub fn get(&self, family: &str) -> Option<FontHandle> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.fonts.get(family).cloned()
    }

    /// Look up `family`, falling back to the first family ever registered.
    ///
    /// Returns `None` only when the registry is empty.
    pub fn resolve(&self, family: &str) -> Option<FontHandle> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(font) = inner.fonts.get(family) {
            return Some(Arc::clone(font));
        }

        let first = inner.order.first()?;
        warn!(
            "Font family '{}' is not registered; falling back to '{}'",
            family, first
        );
        inner.fonts.get(first).cloned()
    }

    /// Registered families in registration order
    pub fn families(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handles(&self) -> Vec<FontHandle> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .filter_map(|family| inner.fonts.get(family).cloned())
            .collect()
    }

    /// Load every registered font, blocking. Failures are collected per
    /// family; the other fonts still load.
    pub fn load_all_sync(&self) -> Vec<(String, FontLoadError)> {
        self.handles()
            .into_iter()
            .filter_map(|font| {
                font.load_sync()
                    .err()
                    .map(|error| (font.family().to_string(), error))
            })
            .collect()
    }

    /// Async counterpart of [`Self::load_all_sync`]. Fonts load one after
    /// another on the calling task.
    pub async fn load_all(&self) -> Vec<(String, FontLoadError)> {
        let mut failures = Vec::new();
        for font in self.handles() {
            if let Err(error) = font.load_async().await {
                failures.push((font.family().to_string(), error));
            }
        }
        failures
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("families", &self.families())
            .finish()
    }
}
