//! The export pipeline: capture an SVG region to PNG, fit it onto a page, and assemble
//! PDF documents.
//!
//! The flow-diagram export renders the export variant of the journey graph, registers
//! it as a capture target (with the inline rendering registered as its fallback),
//! rasterizes it and embeds the image in a page sized to fit. The textual export writes
//! one page per step.

use crate::graph::{GraphOptions, build_graph};
use crate::journey::Journey;
use crate::render::{Theme, render_svg};
use tracing::info;

pub mod capture;
pub mod document;
pub mod fonts;
pub mod gate;
pub mod page;
pub mod raster;
pub mod sanitize;
pub mod text;

pub use capture::{CaptureRegistry, CaptureTarget, export_to_image};
pub use document::embed_in_document;
pub use gate::{ExportGate, ExportPermit};
pub use page::{Orientation, PX_TO_PT, PageLayout, PageOptions, Placement};
pub use raster::{RasterImage, RasterOptions, rasterize_svg};
pub use sanitize::{DEFAULT_FALLBACK_COLOR, neutralize_color_functions, sanitize_svg};
pub use text::{TextDocument, TextLayoutOptions, layout_step_pages, render_text_document};

use crate::error::ExportError;

/// Capture target holding the export rendering of the flow diagram.
pub const FLOW_CAPTURE_TARGET: &str = "journey-flow-export";
/// Capture target holding the on-screen rendering, used when the export one fails.
pub const INLINE_CAPTURE_TARGET: &str = "journey-flow-inline";

/// Everything an export needs besides the journey.
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub raster: RasterOptions,
    pub page: PageOptions,
    pub text: TextLayoutOptions,
    pub theme: Theme,
}

/// A finished export: suggested filename plus file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `journey-<id>.pdf`, the per-step textual report.
pub fn journey_pdf_filename(journey_id: &str) -> String {
    format!("journey-{}.pdf", filename_safe(journey_id))
}

/// `journey-flow-<id>.pdf`, the flow diagram document.
pub fn journey_flow_pdf_filename(journey_id: &str) -> String {
    format!("journey-flow-{}.pdf", filename_safe(journey_id))
}

/// `journey-flow-<id>.png`, the flow diagram image.
pub fn journey_flow_png_filename(journey_id: &str) -> String {
    format!("journey-flow-{}.png", filename_safe(journey_id))
}

/// `journey-flow-<id>.svg`, the vector flow diagram.
pub fn journey_flow_svg_filename(journey_id: &str) -> String {
    format!("journey-flow-{}.svg", filename_safe(journey_id))
}

fn filename_safe(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Registers the export and inline renderings of a journey's flow diagram.
pub fn flow_capture_registry(journey: &Journey, theme: &Theme) -> CaptureRegistry {
    let export_svg = render_svg(&build_graph(journey, &GraphOptions::export()), theme);
    let inline_svg = render_svg(&build_graph(journey, &GraphOptions::inline()), theme);

    let mut registry = CaptureRegistry::new();
    registry
        .register(INLINE_CAPTURE_TARGET, inline_svg)
        .register_with_fallback(FLOW_CAPTURE_TARGET, export_svg, INLINE_CAPTURE_TARGET);
    registry
}

/// Renders the export variant of the flow diagram as standalone SVG.
pub fn export_flow_svg(journey: &Journey, settings: &ExportSettings) -> ExportArtifact {
    let svg = render_svg(&build_graph(journey, &GraphOptions::export()), &settings.theme);
    info!(journey = %journey.id, bytes = svg.len(), "exported flow drawing");
    ExportArtifact {
        filename: journey_flow_svg_filename(&journey.id),
        bytes: svg.into_bytes(),
    }
}

/// Captures the flow diagram to a PNG.
pub fn export_flow_png(
    journey: &Journey,
    settings: &ExportSettings,
) -> Result<ExportArtifact, ExportError> {
    let registry = flow_capture_registry(journey, &settings.theme);
    let image = export_to_image(&registry, FLOW_CAPTURE_TARGET, &settings.raster)?;
    info!(journey = %journey.id, width = image.width, height = image.height, "exported flow image");
    Ok(ExportArtifact {
        filename: journey_flow_png_filename(&journey.id),
        bytes: image.png,
    })
}

/// Captures the flow diagram and embeds it in a fitted single-page PDF.
pub fn export_flow_pdf(
    journey: &Journey,
    settings: &ExportSettings,
) -> Result<ExportArtifact, ExportError> {
    let registry = flow_capture_registry(journey, &settings.theme);
    let image = export_to_image(&registry, FLOW_CAPTURE_TARGET, &settings.raster)?;
    let bytes = embed_in_document(&image, &settings.page)?;
    info!(journey = %journey.id, bytes = bytes.len(), "exported flow document");
    Ok(ExportArtifact {
        filename: journey_flow_pdf_filename(&journey.id),
        bytes,
    })
}

/// Writes the per-step textual report.
pub fn export_steps_pdf(
    journey: &Journey,
    settings: &ExportSettings,
) -> Result<ExportArtifact, ExportError> {
    let document = layout_step_pages(journey, &settings.text);
    let bytes = render_text_document(&document)?;
    info!(
        journey = %journey.id,
        pages = document.pages.len(),
        "exported step report"
    );
    Ok(ExportArtifact {
        filename: journey_pdf_filename(&journey.id),
        bytes,
    })
}
