#[cfg(test)]
mod registry_tests {
    use crate::font_source::{test_fonts, FontDescriptor, FontLoadError, FontRegistry, FontSource};
    use crate::rendering::TextContext;
    use std::sync::Arc;

    #[test]
    fn buffer_font_and_broken_data_uri_side_by_side() {
        let registry = Arc::new(FontRegistry::new());
        let good = registry.register(test_fonts::mono_source(), "A", FontDescriptor::default());
        let bad = registry.register(
            FontSource::from("data:font/ttf;base64,AAAA"),
            "B",
            FontDescriptor::default(),
        );

        good.load_sync().unwrap();
        let error = bad.load_sync().unwrap_err();
        assert!(matches!(error, FontLoadError::ParseFailure { .. }));
        assert!(!bad.is_loaded());
        assert!(bad.parsed().is_none());

        let mut ctx = TextContext::new(registry.clone());
        ctx.set_font("16px A").unwrap();
        let width = ctx.measure_text("AB").width;
        assert!(width > 0.0);

        // Unknown families fall back to the first registered font
        ctx.set_font("16px Missing").unwrap();
        assert_eq!(ctx.measure_text("AB").width, width);

        // A failed font is still resolvable, but measures as the placeholder
        ctx.set_font("16px B").unwrap();
        assert_eq!(ctx.measure_text("AB").width, 10.0);
    }
}

#[cfg(test)]
mod drawing_tests {
    use crate::font_source::{test_fonts, FontDescriptor, FontRegistry};
    use crate::rendering::{PathRecorder, SurfaceOp, SvgSurface, TextAlign, TextBaseline, TextContext};
    use std::sync::Arc;

    fn loaded_context() -> TextContext {
        let registry = Arc::new(FontRegistry::new());
        registry
            .register(test_fonts::mono_source(), "Mono", FontDescriptor::default())
            .load_sync()
            .unwrap();
        TextContext::new(registry)
    }

    #[test]
    fn centered_text_straddles_the_anchor() {
        let mut ctx = loaded_context();
        ctx.set_font("40px Mono").unwrap();
        ctx.text_align = TextAlign::Center;
        ctx.text_baseline = TextBaseline::Middle;

        let mut svg = SvgSurface::new();
        ctx.fill_text(&mut svg, "HH", 200.0, 100.0);
        let bounds = svg.bounds().unwrap();
        assert!(bounds.x0 < 200.0 && bounds.x1 > 200.0);
        assert!(bounds.y0 < 100.0 && bounds.y1 > 100.0);
    }

    #[test]
    fn every_contour_is_painted_separately() {
        let ctx = loaded_context();
        let mut recorder = PathRecorder::new();
        ctx.fill_text(&mut recorder, "OO", 0.0, 0.0);

        assert_eq!(recorder.paint_count(), 4);
        assert!(!recorder.ops.contains(&SurfaceOp::Stroke));
        assert_eq!(recorder.ops.last(), Some(&SurfaceOp::BeginPath));
    }
}
