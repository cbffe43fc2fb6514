//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the journeymap
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use journeymap::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let journey = import_journey(&std::fs::read_to_string("path/to/journey.json")?)?;
//! let graph = build_graph(&journey, &GraphOptions::export());
//! let svg = render_svg(&graph, &Theme::default());
//! std::fs::write("flow.svg", svg)?;
//! # Ok(())
//! # }
//! ```

// Journey model
pub use crate::journey::{
    IntoJourney, Journey, JourneyAnalytics, Metric, Signature, SignatureMatcher, Step, Trend,
};

// Import
pub use crate::import::{import_journey, import_journeys, import_journeys_file};

// Graph building
pub use crate::graph::{
    EdgeKind, Graph, GraphEdge, GraphNode, GraphOptions, GraphVariant, HORIZONTAL_GAP, NodeData,
    NodeKind, Position, TIMELINE_Y, build_graph,
};

// Rendering
pub use crate::render::{Bounds, Theme, Viewport, render_svg};

// Export
pub use crate::export::{
    CaptureRegistry, ExportArtifact, ExportGate, ExportSettings, Orientation, PageLayout,
    PageOptions, RasterImage, RasterOptions, TextLayoutOptions, embed_in_document,
    export_flow_pdf, export_flow_png, export_flow_svg, export_steps_pdf, export_to_image, layout_step_pages,
    render_text_document,
};

// View state and catalog
pub use crate::catalog::{JourneyCatalog, JourneyFilter};
pub use crate::config::ExportConfig;
pub use crate::view::{EmbedLifecycle, ViewMode, ViewState};

// Error types
pub use crate::error::{ConfigError, ExportError, FieldError, ImportError, ViewError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
