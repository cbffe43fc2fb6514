//! # journeymap - User Journey Graphs and Exports
//!
//! **journeymap** models "user journeys", the ordered steps a user takes through a
//! product, and turns them into flow-diagram graphs, SVG renderings, PNG images and PDF
//! documents. Everything runs headless and deterministically.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Journey**: import a JSON document with [`import::import_journey`] (which
//!     reports every structural problem at once), pick one from the
//!     [`catalog`], or implement [`journey::IntoJourney`] for your own format.
//! 2.  **Build the Graph**: [`graph::build_graph`] maps the steps to nodes and edges. The
//!     same builder serves the on-screen flow (`GraphOptions::inline()`) and the export
//!     rendering (`GraphOptions::export()`, which adds a timeline lane).
//! 3.  **Render**: [`render::render_svg`] draws the graph; [`render::Viewport`] provides
//!     "fit all nodes" and "focus on node".
//! 4.  **Export**: [`export`] captures the drawing to PNG, fits it onto a PDF page, or
//!     writes a per-step textual report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use journeymap::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("journey.json")?;
//!     let journey = import_journey(&json)?;
//!
//!     // Highlight the second step in the on-screen flow.
//!     let selected = journey.steps.get(1).map(|s| s.id.as_str());
//!     let graph = build_graph(&journey, &GraphOptions::inline().with_selection(selected));
//!     println!("{}", serde_json::to_string_pretty(&graph)?);
//!
//!     // Export the diagram as a fitted PDF page.
//!     let artifact = export_flow_pdf(&journey, &ExportSettings::default())?;
//!     std::fs::write(&artifact.filename, &artifact.bytes)?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod import;
pub mod journey;
pub mod prelude;
pub mod render;
pub mod view;
