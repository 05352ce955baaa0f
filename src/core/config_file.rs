//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphpath/settings.json

use crate::font_source::{FontDescriptor, FontRegistry, FontSource};
use crate::rendering::FontSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A font registered at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontEntry {
    /// Registry key
    pub family: String,
    /// File path or `data:` URI
    pub source: FontSource,
    #[serde(flatten)]
    pub descriptor: FontDescriptor,
}

/// User configuration from ~/.config/glyphpath/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Fonts to register after those given on the command line
    pub fonts: Vec<FontEntry>,
    /// Font shorthand to draw with (e.g., "16px DejaVu Sans")
    pub default_font: Option<String>,
    /// Log filter used when RUST_LOG is not set (e.g., "info", "glyphpath=debug")
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Get the path to the glyphpath config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphpath")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is not an error; an unreadable or malformed one is
    /// logged and ignored.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// The configured default font, if it parses
    pub fn default_font_spec(&self) -> Option<FontSpec> {
        let shorthand = self.default_font.as_deref()?;
        match shorthand.parse() {
            Ok(spec) => Some(spec),
            Err(e) => {
                warn!("Ignoring default_font in settings: {}", e);
                None
            }
        }
    }

    /// Register configured fonts in file order, skipping families that
    /// are already registered (fonts given on the command line win).
    pub fn register_fonts(&self, registry: &FontRegistry) {
        for entry in &self.fonts {
            if registry.get(&entry.family).is_some() {
                debug!("Font '{}' from settings is overridden", entry.family);
                continue;
            }
            registry.register(entry.source.clone(), entry.family.clone(), entry.descriptor.clone());
        }
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyphpath directory structure
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        // Create the main config directory
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        // Create logs directory
        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        // Create settings.json
        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }

    /// Settings written by `--new-config`
    fn example() -> Self {
        let fonts = ["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"]
            .into_iter()
            .filter(|path| Path::new(path).exists())
            .map(|path| FontEntry {
                family: "DejaVu Sans".to_string(),
                source: FontSource::from(path),
                descriptor: FontDescriptor::default(),
            })
            .collect();
        Self {
            fonts,
            default_font: Some("16px DejaVu Sans".to_string()),
            log_level: Some("info".to_string()),
        }
    }
}
