//! The journey graph builder.
//!
//! A single parameterized routine produces the node/edge graph for both the inline flow
//! view and the export renderer. The [`GraphVariant`] decides whether the export-only
//! timeline lane is emitted; everything else is shared, so the two call sites cannot
//! drift apart.
//!
//! ```rust
//! use journeymap::prelude::*;
//!
//! let journey = Journey::new("signup", "Sign up")
//!     .with_step(Step::new("a", "Landing").with_phase("Discovery"))
//!     .with_step(Step::new("b", "Form").with_phase("Signup"));
//!
//! let graph = build_graph(&journey, &GraphOptions::inline().with_selection(Some("b")));
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.edges[0].label.as_deref(), Some("Signup"));
//! assert_eq!(graph.active_step_ids(), vec!["b"]);
//! ```

use crate::journey::Journey;
use tracing::debug;

mod builder;
pub mod types;

pub use builder::{NO_PRIMARY_METRIC, UNTITLED_STEP, timeline_label, timeline_node_id};
pub use types::*;

/// Horizontal distance between consecutive step nodes.
pub const HORIZONTAL_GAP: f64 = 260.0;
/// Vertical position of the export-only timeline lane.
pub const TIMELINE_Y: f64 = 180.0;

/// Which consumer the graph is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphVariant {
    /// On-screen flow: edges labeled with the target step's phase, selection honoured.
    #[default]
    Inline,
    /// Offscreen export: animated unlabeled edges plus a timeline lane of metric summaries.
    Export,
}

/// Options for [`build_graph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    pub variant: GraphVariant,
    pub selected_step: Option<String>,
    pub horizontal_gap: f64,
    pub timeline_y: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            variant: GraphVariant::Inline,
            selected_step: None,
            horizontal_gap: HORIZONTAL_GAP,
            timeline_y: TIMELINE_Y,
        }
    }
}

impl GraphOptions {
    pub fn inline() -> Self {
        Self::default()
    }

    pub fn export() -> Self {
        Self {
            variant: GraphVariant::Export,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, step_id: Option<&str>) -> Self {
        self.selected_step = step_id.map(str::to_string);
        self
    }

    pub fn with_horizontal_gap(mut self, gap: f64) -> Self {
        self.horizontal_gap = gap;
        self
    }

    pub fn with_timeline_y(mut self, y: f64) -> Self {
        self.timeline_y = y;
        self
    }
}

/// Maps an ordered list of steps to a directed flow graph.
///
/// The result is a pure function of its inputs: building twice from the same journey and
/// options yields identical graphs. It never fails; blank titles and missing metrics
/// degrade to placeholder text.
pub fn build_graph(journey: &Journey, options: &GraphOptions) -> Graph {
    let graph = builder::GraphBuilder::new(journey, options).build();
    debug!(
        journey = %journey.id,
        variant = ?options.variant,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built journey graph"
    );
    graph
}
