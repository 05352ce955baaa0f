//! Command line interface for glyphpath
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use crate::core::config_file::ConfigFile;
use crate::font_source::FontSource;
use crate::rendering::{FontSpec, TextAlign, TextBaseline};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Font shorthand used when neither the CLI nor the config file sets one
pub const DEFAULT_FONT: &str = "16px sans-serif";

/// glyphpath CLI arguments
///
/// Examples:
///   glyphpath --font Inter.ttf "Hello"                  # SVG of filled outlines on stdout
///   glyphpath --font Sans=fonts/Inter.ttf -F "32px Sans" "Hi"
///   glyphpath --font Inter.ttf --align center --baseline middle "Centered"
///   glyphpath --font Inter.ttf --stroke -o hello.svg "Hello"
///   glyphpath --font Inter.ttf --measure "Hello"        # Metrics as JSON
///   glyphpath --font Inter.ttf --commands "O"           # Canvas calls, one per line
///   glyphpath --new-config                              # Write a default settings.json
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "glyphpath",
    version,
    about = "Render text as font outline paths",
    long_about = "glyphpath converts glyph outlines into canvas-style path commands (moveTo, lineTo, quadraticCurveTo, bezierCurveTo, closePath) and paints each contour. Output is an SVG document, the raw command stream, or text metrics."
)]
pub struct CliArgs {
    /// Text to render
    pub text: Option<String>,

    /// Font to register, as `[FAMILY=]SOURCE`
    ///
    /// SOURCE is a font file path or a `data:` URI with a base64 payload.
    /// Without FAMILY, a file's stem is used as the family name.
    #[clap(
        long = "font",
        short = 'f',
        help = "Font to register ([FAMILY=]PATH or data: URI)",
        long_help = "Register a font as [FAMILY=]SOURCE. SOURCE is a path to a TrueType/OpenType file or a data: URI with a base64 payload. Without FAMILY, the file stem (or 'font-N' for data URIs) names the family. May be given more than once; the first font registered is the fallback for unknown families."
    )]
    pub fonts: Vec<String>,

    /// Font shorthand selecting size and family, like a canvas `font`
    #[clap(
        long = "font-spec",
        short = 'F',
        help = "Font shorthand, e.g. \"16px Inter\"",
        long_help = "Font shorthand selecting the size and family to draw with, e.g. \"16px Inter\" or \"12pt 'DejaVu Sans'\". Defaults to the config file's default_font, then 16px sans-serif."
    )]
    pub font_spec: Option<FontSpec>,

    /// Override the size from the font shorthand, in pixels
    #[clap(long = "size", short = 's')]
    pub size: Option<f64>,

    /// Horizontal alignment: start, left, end, right, center
    #[clap(long = "align", default_value = "start")]
    pub align: TextAlign,

    /// Vertical alignment: alphabetic, top, middle, bottom
    #[clap(long = "baseline", default_value = "alphabetic")]
    pub baseline: TextBaseline,

    /// Anchor x coordinate
    #[clap(long = "x", default_value_t = 0.0, allow_negative_numbers = true)]
    pub x: f64,

    /// Anchor y coordinate
    #[clap(long = "y", default_value_t = 0.0, allow_negative_numbers = true)]
    pub y: f64,

    /// Stroke contours instead of filling them
    #[clap(long = "stroke")]
    pub stroke: bool,

    /// Write output to a file instead of stdout
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Print text metrics as JSON instead of drawing
    #[clap(long = "measure", conflicts_with = "commands")]
    pub measure: bool,

    /// Print the canvas calls instead of an SVG document
    #[clap(long = "commands")]
    pub commands: bool,

    /// Load fonts through the async loader
    #[clap(
        long = "async-load",
        help = "Load fonts asynchronously",
        long_help = "Load fonts through the asynchronous loader on a single-threaded runtime instead of blocking reads. The result is the same; this exercises the non-blocking path."
    )]
    pub async_load: bool,

    /// Use a specific settings file instead of the user config
    #[clap(long = "config")]
    pub config: Option<PathBuf>,

    /// Initialize user configuration directory with a default settings file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Create the glyphpath config directory with a settings.json listing default fonts, the default font shorthand and log level, plus a logs/ directory."
    )]
    pub new_config: bool,

    /// Also write logs to the logs directory in the config directory
    #[clap(long = "log-file")]
    pub log_file: bool,
}

/// A `--font` argument split into family and source
#[derive(Debug, Clone, PartialEq)]
pub struct FontArg {
    pub family: String,
    pub source: FontSource,
}

impl FontArg {
    /// Parse `[FAMILY=]SOURCE`. `index` names data URIs without a family.
    pub fn parse(arg: &str, index: usize) -> Self {
        let explicit = arg.split_once('=').filter(|(family, _)| {
            !family.is_empty()
                && !family.contains(|c| matches!(c, ':' | '/' | '\\' | ';' | ','))
        });
        if let Some((family, source)) = explicit {
            return Self {
                family: family.to_string(),
                source: FontSource::from(source),
            };
        }

        let source = FontSource::from(arg);
        let family = source
            .path()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("font-{index}"));
        Self { family, source }
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before the application starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        if self.text.is_none() {
            return Err("No text given.\nPass the text to render as the last argument.".to_string());
        }

        for (index, font) in self.font_args().iter().enumerate() {
            if let Err(e) = font.source.validate() {
                return Err(format!("Font #{}: {e}", index + 1));
            }
            if let Some(path) = font.source.path() {
                if !path.is_file() {
                    return Err(format!(
                        "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
                        path.display()
                    ));
                }
            }
        }

        if let Some(size) = self.size {
            if !size.is_finite() || size <= 0.0 {
                return Err(format!("Invalid size: {size}\nSize must be a positive number of pixels."));
            }
        }

        Ok(())
    }

    /// `--font` arguments with their families resolved
    pub fn font_args(&self) -> Vec<FontArg> {
        self.fonts
            .iter()
            .enumerate()
            .map(|(index, arg)| FontArg::parse(arg, index + 1))
            .collect()
    }

    /// Get the font to draw with from CLI args, config file, or default
    ///
    /// Priority order:
    /// 1. CLI argument (--font-spec, then --size)
    /// 2. Config file setting (default_font)
    /// 3. Built-in default (16px sans-serif)
    pub fn resolve_font_spec(&self, config: Option<&ConfigFile>) -> FontSpec {
        let mut spec = if let Some(spec) = &self.font_spec {
            debug!("Using font from CLI: {}", spec);
            spec.clone()
        } else if let Some(spec) = config.and_then(ConfigFile::default_font_spec) {
            debug!("Using font from config file: {}", spec);
            spec
        } else {
            debug!("Using default font: {}", DEFAULT_FONT);
            FontSpec::default()
        };

        if let Some(size) = self.size {
            spec.size = size;
        }
        spec
    }
}
