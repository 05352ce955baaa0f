//! Application runner logic
//!
//! Registers fonts, loads them, and renders the requested output.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::font_source::{FontDescriptor, FontLoadError, FontRegistry, TextMetrics};
use crate::logging;
use crate::rendering::{DrawingSurface, PathRecorder, SvgSurface, TextContext};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

/// JSON printed by `--measure`
#[derive(Debug, Serialize)]
struct MeasureReport<'a> {
    font: String,
    text: &'a str,
    metrics: TextMetrics,
}

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the renderer.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;

    let config = match &cli_args.config {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    };
    let _log_guard = logging::init(
        config.as_ref().and_then(|c| c.log_level.as_deref()),
        cli_args.log_file,
    )?;

    let output = render(&cli_args, config.as_ref())?;
    match &cli_args.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}

/// Produce the requested output (SVG, command listing or metrics JSON).
pub fn render(cli_args: &CliArgs, config: Option<&ConfigFile>) -> Result<String> {
    let text = cli_args.text.as_deref().context("No text given")?;
    let registry = Arc::new(FontRegistry::new());

    let mut required = HashSet::new();
    for font in cli_args.font_args() {
        registry.register(font.source, font.family.clone(), FontDescriptor::default());
        required.insert(font.family);
    }
    if let Some(config) = config {
        config.register_fonts(&registry);
    }

    let failures = load_fonts(&registry, cli_args.async_load)?;
    for (family, error) in failures {
        if required.contains(&family) {
            return Err(anyhow::Error::new(error))
                .with_context(|| format!("Failed to load font '{family}'"));
        }
        warn!("Skipping font '{}' from settings: {}", family, error);
    }

    let mut ctx = TextContext::new(registry);
    ctx.font = cli_args.resolve_font_spec(config);
    ctx.text_align = cli_args.align;
    ctx.text_baseline = cli_args.baseline;

    if cli_args.measure {
        let report = MeasureReport {
            font: ctx.font.to_string(),
            text,
            metrics: ctx.measure_text(text),
        };
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }

    if cli_args.commands {
        let mut recorder = PathRecorder::new();
        draw(&ctx, &mut recorder, cli_args, text);
        let mut listing = String::new();
        for op in &recorder.ops {
            listing.push_str(&op.to_string());
            listing.push('\n');
        }
        return Ok(listing);
    }

    let mut svg = SvgSurface::new();
    draw(&ctx, &mut svg, cli_args, text);
    Ok(svg.to_svg(ctx.font.size / 8.0))
}

fn draw<S: DrawingSurface>(
    ctx: &TextContext,
    surface: &mut S,
    cli_args: &CliArgs,
    text: &str,
) {
    if cli_args.stroke {
        ctx.stroke_text(surface, text, cli_args.x, cli_args.y);
    } else {
        ctx.fill_text(surface, text, cli_args.x, cli_args.y);
    }
}

/// Load every registered font, through the async loader when asked.
/// The async path runs on a single-threaded runtime.
fn load_fonts(registry: &FontRegistry, async_load: bool) -> Result<Vec<(String, FontLoadError)>> {
    if !async_load {
        return Ok(registry.load_all_sync());
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(registry.load_all()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["glyphpath", "--font", FIXTURE];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn renders_svg_with_one_path_per_contour() {
        let svg = render(&args(&["-F", "32px DejaVuSansMono", "O"]), None).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn lists_canvas_calls() {
        let listing = render(&args(&["--commands", "--stroke", "O"]), None).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.first(), Some(&"beginPath()"));
        assert_eq!(lines.iter().filter(|l| **l == "stroke()").count(), 2);
        assert!(lines.iter().any(|l| l.starts_with("moveTo(")));
    }

    #[test]
    fn measures_as_json() {
        let json = render(&args(&["--measure", "-F", "10px Anything", ""]), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["width"], 0.0);
        assert!(value["metrics"]["emHeightAscent"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn async_loading_gives_the_same_metrics() {
        let sync = render(&args(&["--measure", "Hello"]), None).unwrap();
        let asynchronous = render(&args(&["--measure", "--async-load", "Hello"]), None).unwrap();
        assert_eq!(sync, asynchronous);
    }

    #[test]
    fn broken_cli_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.ttf");
        fs::write(&bad, b"not a font").unwrap();
        let cli = CliArgs::try_parse_from(["glyphpath", "--font", bad.to_str().unwrap(), "Hi"]).unwrap();
        let error = render(&cli, None).unwrap_err();
        assert!(error.to_string().contains("bad"));
    }

    #[test]
    fn broken_settings_font_is_skipped() {
        let config = ConfigFile {
            fonts: vec![crate::core::config_file::FontEntry {
                family: "Broken".to_string(),
                source: crate::font_source::FontSource::from(b"junk".to_vec()),
                descriptor: FontDescriptor::default(),
            }],
            ..ConfigFile::default()
        };
        let svg = render(&args(&["O"]), Some(&config)).unwrap();
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn unusable_settings_source_is_skipped() {
        let config = ConfigFile {
            fonts: vec![
                crate::core::config_file::FontEntry {
                    family: "Bad".to_string(),
                    source: crate::font_source::FontSource::from("data:nocomma"),
                    descriptor: FontDescriptor::default(),
                },
                crate::core::config_file::FontEntry {
                    family: "Good".to_string(),
                    source: crate::font_source::FontSource::from(FIXTURE),
                    descriptor: FontDescriptor::default(),
                },
            ],
            ..ConfigFile::default()
        };
        let cli = CliArgs::try_parse_from(["glyphpath", "-F", "16px Good", "O"]).unwrap();
        let svg = render(&cli, Some(&config)).unwrap();
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn without_fonts_nothing_is_drawn() {
        let cli = CliArgs::try_parse_from(["glyphpath", "--measure", "Hi"]).unwrap();
        let json = render(&cli, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["width"], 10.0);
    }
}
