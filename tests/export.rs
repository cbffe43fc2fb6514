//! Tests for the export pipeline: sanitization, capture, page fitting and documents.
mod common;
use common::*;
use journeymap::error::ExportError;
use journeymap::export::fonts::text_width;
use journeymap::export::text::{
    CONTINUED_MARKER, MAX_HEADING_LINES, MAX_TITLE_LINES, NO_METRICS_NOTICE, NO_STEPS_NOTICE,
};
use journeymap::export::{
    FLOW_CAPTURE_TARGET, INLINE_CAPTURE_TARGET, PX_TO_PT, flow_capture_registry,
    journey_flow_pdf_filename, journey_flow_png_filename, journey_flow_svg_filename,
    journey_pdf_filename,
    neutralize_color_functions, sanitize_svg,
};
use journeymap::prelude::*;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn small_svg(fill: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"40\" height=\"20\"><rect width=\"40\" height=\"20\" fill=\"{}\"/></svg>",
        fill
    )
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// --- Page fitting ---

#[test]
fn test_page_matches_image_plus_margins() {
    let layout = PageLayout::fit(1200, 600, &PageOptions::default().with_margin(20.0)).unwrap();
    assert_eq!(layout.orientation, Orientation::Landscape);
    assert!(approx(layout.width, 1200.0 * PX_TO_PT + 40.0));
    assert!(approx(layout.height, 600.0 * PX_TO_PT + 40.0));
    assert!(approx(layout.image.x, 20.0));
    assert!(approx(layout.image.y, 20.0));
    assert!(approx(layout.image.width, 900.0));
    assert!(approx(layout.image.height, 450.0));
}

#[test]
fn test_orientation_follows_aspect_ratio() {
    let tall = PageLayout::fit(300, 900, &PageOptions::default()).unwrap();
    assert_eq!(tall.orientation, Orientation::Portrait);
    assert!(tall.height > tall.width);

    let square = PageLayout::fit(500, 500, &PageOptions::default()).unwrap();
    assert_eq!(square.orientation, Orientation::Landscape);
}

#[test]
fn test_forced_orientation_scales_and_centers() {
    let options = PageOptions::default()
        .with_margin(10.0)
        .with_orientation(Orientation::Portrait);
    let layout = PageLayout::fit(800, 400, &options).unwrap();

    assert_eq!(layout.orientation, Orientation::Portrait);
    assert!(layout.height > layout.width);

    let safe_w = layout.width - 20.0;
    assert!(layout.image.width <= safe_w + 1e-9);
    assert!(approx(layout.image.width / layout.image.height, 2.0));

    let left = layout.image.x;
    let right = layout.width - layout.image.x - layout.image.width;
    let top = layout.image.y;
    let bottom = layout.height - layout.image.y - layout.image.height;
    assert!(approx(left, right));
    assert!(approx(top, bottom));
    assert!(left >= 10.0 - 1e-9 && top >= 10.0 - 1e-9);
}

#[test]
fn test_empty_image_is_rejected() {
    let err = PageLayout::fit(0, 100, &PageOptions::default()).unwrap_err();
    assert!(matches!(err, ExportError::EmptyImage));
}

// --- Sanitization ---

#[test]
fn test_color_functions_are_neutralized() {
    let css = "fill: oklch(0.7 0.1 200); stroke: color-mix(in srgb, oklab(0.5 0 0) 40%, white)";
    let out = neutralize_color_functions(css, "#888888");
    assert_eq!(out.text, "fill: #888888; stroke: #888888");
    assert_eq!(out.replaced, 2);

    let plain = neutralize_color_functions("fill: #fff; stroke: rgb(1, 2, 3)", "#888888");
    assert_eq!(plain.replaced, 0);
    assert_eq!(plain.text, "fill: #fff; stroke: rgb(1, 2, 3)");
}

#[test]
fn test_svg_text_content_is_untouched() {
    let svg = "<svg><style>.a{color:lch(50% 20 10)}</style><rect fill='oklch(1 0 0)'/><text>oklch(0.5 0 0) is a color</text></svg>";
    let out = sanitize_svg(svg, "#000000");
    assert_eq!(out.replaced, 2);
    assert!(out.text.contains(".a{color:#000000}"));
    assert!(out.text.contains("fill='#000000'"));
    assert!(out.text.contains("<text>oklch(0.5 0 0) is a color</text>"));
}

// --- Capture ---

#[test]
fn test_capture_produces_png() {
    let mut registry = CaptureRegistry::new();
    registry.register("box", small_svg("#ff0000"));

    let image = export_to_image(&registry, "box", &RasterOptions::default().with_pixel_ratio(2.0))
        .unwrap();
    assert!(image.png.starts_with(PNG_SIGNATURE));
    assert_eq!((image.width, image.height), (80, 40));
    assert!(approx(image.aspect_ratio(), 2.0));
}

#[test]
fn test_capture_survives_unsupported_colors() {
    let mut registry = CaptureRegistry::new();
    registry.register("box", small_svg("oklch(0.6 0.2 260)"));
    let image = export_to_image(&registry, "box", &RasterOptions::default()).unwrap();
    assert!(image.png.starts_with(PNG_SIGNATURE));
}

#[test]
fn test_unknown_target_is_reported() {
    let registry = CaptureRegistry::new();
    let err = export_to_image(&registry, "missing", &RasterOptions::default()).unwrap_err();
    assert!(matches!(err, ExportError::TargetNotFound(ref id) if id == "missing"));
}

#[test]
fn test_fallback_target_is_used_on_failure() {
    let mut registry = CaptureRegistry::new();
    registry
        .register("inline", small_svg("#00ff00"))
        .register_with_fallback("export", "<svg", "inline");

    let image = export_to_image(&registry, "export", &RasterOptions::default()).unwrap();
    assert_eq!((image.width, image.height), (80, 40));

    registry.remove("inline");
    let err = export_to_image(&registry, "export", &RasterOptions::default()).unwrap_err();
    assert!(matches!(err, ExportError::SvgParse { .. }));
}

#[test]
fn test_invalid_background_is_an_error() {
    let mut registry = CaptureRegistry::new();
    registry.register("box", small_svg("#ff0000"));
    let options = RasterOptions::default().with_background("not-a-color");
    let err = export_to_image(&registry, "box", &options).unwrap_err();
    assert!(matches!(err, ExportError::InvalidBackground(_)));
}

#[test]
fn test_css_backgrounds_are_accepted() {
    let mut registry = CaptureRegistry::new();
    registry.register("box", small_svg("#ff0000"));
    for background in ["rgb(248, 250, 252)", "rgba(0, 0, 0, 0.5)", "slategray", "transparent"] {
        let options = RasterOptions::default().with_background(background);
        let image = export_to_image(&registry, "box", &options)
            .unwrap_or_else(|e| panic!("background '{}' rejected: {}", background, e));
        assert!(image.png.starts_with(PNG_SIGNATURE));
    }
}

#[test]
fn test_flow_registry_holds_both_renderings() {
    let registry = flow_capture_registry(&create_abc_journey(), &Theme::default());
    assert_eq!(registry.len(), 2);
    let export = registry.get(FLOW_CAPTURE_TARGET).unwrap();
    assert_eq!(export.fallback.as_deref(), Some(INLINE_CAPTURE_TARGET));
    assert!(export.svg.contains("Visits: 1,000"));
    assert!(registry.get(INLINE_CAPTURE_TARGET).is_some());
}

// --- Documents ---

#[test]
fn test_embed_in_document_writes_pdf() {
    let mut registry = CaptureRegistry::new();
    registry.register("box", small_svg("#123456"));
    let image = export_to_image(&registry, "box", &RasterOptions::default()).unwrap();

    let pdf = embed_in_document(&image, &PageOptions::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_step_pages_one_per_step() {
    let journey = create_abc_journey();
    let document = layout_step_pages(&journey, &TextLayoutOptions::default());

    assert_eq!(document.pages.len(), 3);
    for (i, page) in document.pages.iter().enumerate() {
        assert_eq!(page.step_index, Some(i));
        assert!(!page.continuation);
        assert!(page.contains("ABC Journey"));
    }
    assert!(document.pages[0].contains("Step 1 of 3: Step A"));
    assert!(document.pages[0].contains("Visits: 1,000 (up)"));
    assert!(document.pages[2].contains(NO_METRICS_NOTICE));
}

#[test]
fn test_long_step_continues_on_next_page() {
    let journey = create_long_step_journey();
    let options = TextLayoutOptions::default();
    let document = layout_step_pages(&journey, &options);

    assert!(document.pages.len() > 1);
    assert!(document.pages.iter().all(|p| p.step_index == Some(0)));
    assert!(!document.pages[0].continuation);
    for page in &document.pages[1..] {
        assert!(page.continuation);
        assert!(page.contains(CONTINUED_MARKER));
    }
    for page in &document.pages {
        for line in &page.lines {
            assert!(line.y <= options.page_height - options.margin + 1e-9);
        }
    }
}

fn create_wide_text_journey() -> Journey {
    let capitals = "WWWWW MMMMM QUARTERLY REVIEW ".repeat(40);
    let step = Step::new("wide", format!("Wide {}", "Wmw ".repeat(80)))
        .with_phase(format!("Phase {}", "WWW ".repeat(60)))
        .with_description(capitals.clone())
        .with_detail(format!("{} {}", "W".repeat(300), capitals))
        .with_metric(Metric::new("WWWW ".repeat(40), "1,000,000", Trend::Up));
    Journey::new("wide", format!("Wide Journey {}", "WWWW ".repeat(100))).with_step(step)
}

#[test]
fn test_every_line_fits_the_text_column() {
    let options = TextLayoutOptions::default();
    let document = layout_step_pages(&create_wide_text_journey(), &options);
    assert!(document.pages.len() > 1);

    for page in &document.pages {
        for line in &page.lines {
            let width = text_width(&line.text, line.font, line.size);
            assert!(
                width <= options.content_width() + 1e-9,
                "line is {:.1}pt wide, column is {:.1}pt: {}",
                width,
                options.content_width(),
                line.text
            );
        }
    }
}

#[test]
fn test_long_headers_wrap_and_repeat_on_every_page() {
    let options = TextLayoutOptions::default();
    let document = layout_step_pages(&create_wide_text_journey(), &options);

    for (i, page) in document.pages.iter().enumerate() {
        let title: Vec<_> = page
            .lines
            .iter()
            .take_while(|l| l.size == options.title_size)
            .collect();
        assert_eq!(title.len(), MAX_TITLE_LINES);
        assert!(title[0].text.starts_with("Wide Journey"));
        assert!(title[MAX_TITLE_LINES - 1].text.ends_with('…'));

        let heading: Vec<_> = page
            .lines
            .iter()
            .filter(|l| l.size == options.heading_size)
            .collect();
        assert!(heading[0].text.starts_with("Step 1 of 1: Wide"));
        assert!(heading.len() <= MAX_HEADING_LINES + 1);
        if i > 0 {
            assert!(heading.iter().any(|l| l.text.ends_with(CONTINUED_MARKER)));
        }
        for line in page.lines.iter() {
            assert!(line.y <= options.page_height - options.margin + 1e-9);
        }
    }
}

#[test]
fn test_empty_journey_gets_cover_page() {
    let journey = Journey::new("none", "No Steps").with_description("Still being drafted.");
    let document = layout_step_pages(&journey, &TextLayoutOptions::default());
    assert_eq!(document.pages.len(), 1);
    assert_eq!(document.pages[0].step_index, None);
    assert!(document.pages[0].contains(NO_STEPS_NOTICE));
    assert!(document.pages[0].contains("Still being drafted."));

    let pdf = render_text_document(&document).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_steps_pdf_export() {
    let artifact = export_steps_pdf(&create_abc_journey(), &ExportSettings::default()).unwrap();
    assert_eq!(artifact.filename, "journey-abc.pdf");
    assert!(artifact.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_flow_exports() {
    let journey = create_abc_journey();
    let settings = ExportSettings::default();

    let png = export_flow_png(&journey, &settings).unwrap();
    assert_eq!(png.filename, "journey-flow-abc.png");
    assert!(png.bytes.starts_with(PNG_SIGNATURE));

    let pdf = export_flow_pdf(&journey, &settings).unwrap();
    assert_eq!(pdf.filename, "journey-flow-abc.pdf");
    assert!(pdf.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_filenames_are_path_safe() {
    assert_eq!(journey_pdf_filename("a/b c"), "journey-a-b-c.pdf");
    assert_eq!(journey_flow_pdf_filename("x_1"), "journey-flow-x_1.pdf");
    assert_eq!(journey_flow_png_filename("q?"), "journey-flow-q-.png");
    assert_eq!(journey_flow_svg_filename("../up"), "journey-flow----up.svg");
}

#[test]
fn test_svg_export_uses_safe_filename() {
    let journey = Journey::new("q?/x", "Odd Id").with_step(Step::new("s", "Only"));
    let artifact = export_flow_svg(&journey, &ExportSettings::default());
    assert_eq!(artifact.filename, "journey-flow-q--x.svg");
    assert!(!artifact.filename.contains('/'));
    let svg = String::from_utf8(artifact.bytes).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Only"));
}

// --- Gate ---

#[test]
fn test_gate_rejects_concurrent_export() {
    let gate = ExportGate::new();
    let permit = gate.begin().unwrap();
    assert!(gate.is_busy());
    assert!(matches!(gate.begin(), Err(ExportError::Busy)));

    let nested = gate.run(|| Ok(()));
    assert!(matches!(nested, Err(ExportError::Busy)));

    drop(permit);
    assert!(!gate.is_busy());
}

#[test]
fn test_gate_frees_after_failure() {
    let gate = ExportGate::new();
    let failed: std::result::Result<(), ExportError> = gate.run(|| Err(ExportError::EmptyImage));
    assert!(failed.is_err());
    assert!(!gate.is_busy());
    assert_eq!(gate.run(|| Ok(7)).unwrap(), 7);
}
