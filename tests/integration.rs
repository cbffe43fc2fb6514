//! Integration tests for journeymap
//!
//! End-to-end tests that verify import, graph building and export work together.
//!
mod common;
use common::*;
use journeymap::prelude::*;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_document_to_exports() {
        let journey = import_journey(SIMPLE_JOURNEY_JSON).expect("Failed to import journey");
        let settings = ExportSettings::default();

        let png = export_flow_png(&journey, &settings).expect("Failed to export PNG");
        let flow_pdf = export_flow_pdf(&journey, &settings).expect("Failed to export flow PDF");
        let steps_pdf = export_steps_pdf(&journey, &settings).expect("Failed to export step PDF");

        assert!(!png.bytes.is_empty());
        assert!(flow_pdf.bytes.starts_with(b"%PDF"));
        assert!(steps_pdf.bytes.starts_with(b"%PDF"));

        println!(
            "Exported '{}': png {} bytes, flow pdf {} bytes, step pdf {} bytes",
            journey.id,
            png.bytes.len(),
            flow_pdf.bytes.len(),
            steps_pdf.bytes.len()
        );
    }

    #[test]
    fn test_every_sample_exports() {
        let catalog = JourneyCatalog::with_samples();
        let settings = ExportSettings::default();

        for journey in catalog.all() {
            let graph = build_graph(journey, &GraphOptions::export());
            assert_eq!(graph.step_nodes().count(), journey.steps.len());
            assert_eq!(graph.timeline_nodes().count(), journey.steps.len());

            let document = layout_step_pages(journey, &settings.text);
            assert!(document.pages.len() >= journey.steps.len());

            let artifact = export_flow_pdf(journey, &settings)
                .unwrap_or_else(|e| panic!("Export of '{}' failed: {}", journey.id, e));
            assert!(artifact.bytes.starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_export_through_gate_to_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let journey = create_abc_journey();
        let gate = ExportGate::new();

        let artifact = gate
            .run(|| export_steps_pdf(&journey, &ExportSettings::default()))
            .expect("Export should succeed");
        let path = dir.path().join(&artifact.filename);
        fs::write(&path, &artifact.bytes).expect("Failed to write artifact");

        let written = fs::read(&path).expect("Failed to read artifact back");
        assert_eq!(written, artifact.bytes);
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_config_file_drives_export() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = dir.path().join("export.json");
        fs::write(
            &config_path,
            r#"{ "pixelRatio": 1, "margin": 0, "orientation": "portrait", "background": "oklch(0.98 0 0)" }"#,
        )
        .unwrap();

        let config = ExportConfig::from_file(config_path.to_str().unwrap()).unwrap();
        assert_eq!(config.orientation, Some(Orientation::Portrait));
        let settings = config.into_settings();

        let registry = journeymap::export::flow_capture_registry(&create_abc_journey(), &settings.theme);
        let image = export_to_image(
            &registry,
            journeymap::export::FLOW_CAPTURE_TARGET,
            &settings.raster.clone().with_background("#ffffff"),
        )
        .unwrap();

        let layout = PageLayout::fit(image.width, image.height, &settings.page).unwrap();
        assert_eq!(layout.orientation, Orientation::Portrait);
        assert!(layout.height > layout.width);

        // The page background goes through the same color sanitization as captures.
        let pdf = embed_in_document(&image, &settings.page).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_import_file_with_multiple_journeys() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("journeys.json");
        let catalog = JourneyCatalog::with_samples();
        fs::write(&path, serde_json::to_string(catalog.all()).unwrap()).unwrap();

        let imported = import_journeys_file(path.to_str().unwrap()).expect("Failed to import");
        assert_eq!(imported.len(), catalog.len());
        for (original, loaded) in catalog.all().iter().zip(&imported) {
            assert_eq!(original.id, loaded.id);
            assert_eq!(original.steps.len(), loaded.steps.len());
            let original_ids: Vec<_> = original.steps.iter().map(|s| &s.id).collect();
            let loaded_ids: Vec<_> = loaded.steps.iter().map(|s| &s.id).collect();
            assert_eq!(original_ids, loaded_ids);
        }
    }
}
