use base64::Engine;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");

fn run_glyphpath(args: &[&str], dir: &Path) -> Output {
    // Settings live in the test's own directory so the user's config is never read
    let config = dir.join("settings.json");
    Command::new(env!("CARGO_BIN_EXE_glyphpath"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("run glyphpath")
}

#[test]
fn svg_goes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_glyphpath(&["--font", FIXTURE, "O"], dir.path());

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"), "expected SVG, got: {stdout}");
    assert_eq!(stdout.matches("<path").count(), 2);
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("hello.svg");
    let output = run_glyphpath(
        &["--font", FIXTURE, "--stroke", "-o", target.to_str().unwrap(), "Hi"],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    assert!(output.stdout.is_empty());
    let svg = fs::read_to_string(&target).unwrap();
    assert!(svg.contains("stroke="), "expected stroked paths, got: {svg}");
}

#[test]
fn commands_list_canvas_calls() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_glyphpath(&["--font", FIXTURE, "--commands", "O"], dir.path());

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"beginPath()"));
    assert_eq!(lines.iter().filter(|l| **l == "closePath()").count(), 2);
    assert_eq!(lines.iter().filter(|l| **l == "fill()").count(), 2);
}

#[test]
fn measure_prints_metrics_json() {
    let dir = tempfile::tempdir().unwrap();
    // A whole font is too long for one argument, so the data URI goes in the settings file
    let uri = format!(
        "data:font/ttf;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(fs::read(FIXTURE).unwrap())
    );
    let settings = serde_json::json!({
        "fonts": [ { "family": "Mono", "source": uri } ],
    });
    fs::write(dir.path().join("settings.json"), settings.to_string()).unwrap();

    let output = run_glyphpath(
        &["-F", "20px Mono", "--async-load", "--measure", "AB"],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["font"], "20px Mono");
    assert!(json["metrics"]["width"].as_f64().unwrap() > 0.0);
    assert_ne!(json["metrics"]["width"], 10.0);
    assert!(json["metrics"]["emHeightDescent"].as_f64().unwrap() < 0.0);
}

#[test]
fn settings_file_registers_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let settings = serde_json::json!({
        "fonts": [ { "family": "Configured", "source": FIXTURE } ],
        "default_font": "32px Configured",
    });
    fs::write(dir.path().join("settings.json"), settings.to_string()).unwrap();

    let output = run_glyphpath(&["--measure", "A"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["font"], "32px Configured");
    assert_ne!(json["metrics"]["width"], 10.0);
}

#[test]
fn missing_font_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_glyphpath(&["--font", "nope.ttf", "Hi"], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.ttf"), "unexpected stderr: {stderr}");
}

#[test]
fn malformed_data_uri_font_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_glyphpath(&["--font", "Bad=data:font/ttf;base64,AAAA", "Hi"], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bad"), "unexpected stderr: {stderr}");
}
