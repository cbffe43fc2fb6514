use crate::graph::{Graph, GraphNode, NodeKind};

/// Width of a step card.
pub const NODE_WIDTH: f64 = 220.0;
/// Height of a step card.
pub const NODE_HEIGHT: f64 = 120.0;
/// Height of a timeline summary pill.
pub const TIMELINE_NODE_HEIGHT: f64 = 48.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 2.0;

/// Rendered size of a node, by kind.
pub fn node_size(node: &GraphNode) -> (f64, f64) {
    match node.kind {
        NodeKind::Step => (NODE_WIDTH, NODE_HEIGHT),
        NodeKind::Timeline => (NODE_WIDTH, TIMELINE_NODE_HEIGHT),
    }
}

/// Axis-aligned box enclosing every node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// `None` for an empty graph.
    pub fn of(graph: &Graph) -> Option<Self> {
        graph.nodes.iter().fold(None, |acc, node| {
            let (w, h) = node_size(node);
            let b = Bounds {
                min_x: node.position.x,
                min_y: node.position.y,
                max_x: node.position.x + w,
                max_y: node.position.y + h,
            };
            Some(match acc {
                None => b,
                Some(a) => a.union(&b),
            })
        })
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Pan and zoom of a canvas: a graph point `p` lands on screen at `p * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// "Fit all nodes": the largest zoom (within limits) that shows `bounds` inside a
    /// `width` × `height` screen with `padding` on each side, centered.
    pub fn fit(bounds: &Bounds, width: f64, height: f64, padding: f64) -> Self {
        let avail_w = (width - 2.0 * padding).max(1.0);
        let avail_h = (height - 2.0 * padding).max(1.0);
        let zoom = if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            1.0
        } else {
            (avail_w / bounds.width()).min(avail_h / bounds.height())
        }
        .clamp(MIN_ZOOM, MAX_ZOOM);
        Self::centered_on(bounds.center(), width, height, zoom)
    }

    /// "Focus on node": centers the node at the given zoom. `None` if the node is unknown.
    pub fn focus(graph: &Graph, node_id: &str, width: f64, height: f64, zoom: f64) -> Option<Self> {
        let node = graph.node(node_id)?;
        let (w, h) = node_size(node);
        let center = (node.position.x + w / 2.0, node.position.y + h / 2.0);
        Some(Self::centered_on(
            center,
            width,
            height,
            zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        ))
    }

    fn centered_on(center: (f64, f64), width: f64, height: f64, zoom: f64) -> Self {
        Self {
            x: width / 2.0 - center.0 * zoom,
            y: height / 2.0 - center.1 * zoom,
            zoom,
        }
    }

    /// Screen position of a graph point.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.x, y * self.zoom + self.y)
    }
}
