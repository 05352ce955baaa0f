use glyphpath::font_source::{
    measure, FontDescriptor, FontLoadError, FontRegistry, FontSource, LoadState, TextMetrics,
};
use glyphpath::rendering::{emit_path, PathRecorder, SurfaceOp};
use std::sync::Arc;

const MONO: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");
const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");

#[test]
fn loads_from_buffer_and_measures() {
    let registry = FontRegistry::new();
    let font = registry.register(FontSource::from(MONO.to_vec()), "A", FontDescriptor::default());
    assert!(matches!(font.state(), LoadState::Unloaded));

    font.load_sync().unwrap();
    let metrics = measure(&font, "AB", 16.0);
    assert!(metrics.width > 0.0);
    assert!(metrics.em_height_ascent > 0.0);
    assert!(metrics.em_height_descent < 0.0);
    assert_eq!(measure(&font, "", 16.0).width, 0.0);
}

#[test]
fn malformed_data_uri_fails_to_parse() {
    let registry = FontRegistry::new();
    let font = registry.register("data:font/ttf;base64,AAAA", "B", FontDescriptor::default());

    let error = font.load_sync().unwrap_err();
    assert!(error.is_parse_failure(), "unexpected error: {error}");
    assert!(matches!(font.state(), LoadState::Failed(_)));
    assert_eq!(measure(&font, "AB", 16.0), TextMetrics::PLACEHOLDER);

    let mut recorder = PathRecorder::new();
    emit_path(&font, "AB", 0.0, 0.0, 16.0, true, &mut recorder);
    assert!(recorder.ops.is_empty());
}

#[test]
fn missing_file_is_an_io_failure() {
    let registry = FontRegistry::new();
    let font = registry.register("/definitely/not/here.ttf", "C", FontDescriptor::default());
    assert!(matches!(font.load_sync(), Err(FontLoadError::IoFailure { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_loads_of_one_font_share_the_result() {
    let registry = Arc::new(FontRegistry::new());
    let font = registry.register(FIXTURE, "Mono", FontDescriptor::default());

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let font = font.clone();
            tokio::spawn(async move { font.load_async().await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let first = font.parsed().unwrap();
    font.load_async().await.unwrap();
    assert!(font.is_loaded());
    assert_eq!(first.units_per_em(), font.parsed().unwrap().units_per_em());
}

#[test]
fn unknown_family_resolves_to_first_registered() {
    let registry = FontRegistry::new();
    let first = registry.register(FIXTURE, "First", FontDescriptor::default());
    registry.register(FIXTURE, "Second", FontDescriptor::default());

    assert!(Arc::ptr_eq(&registry.resolve("Nope").unwrap(), &first));
    assert!(registry.load_all_sync().is_empty());

    let mut recorder = PathRecorder::new();
    emit_path(&first, "O", 0.0, 0.0, 16.0, true, &mut recorder);
    assert_eq!(recorder.ops.first(), Some(&SurfaceOp::BeginPath));
    assert_eq!(recorder.paint_count(), 2);
}
