use crate::journey::Metric;
use serde::Serialize;

/// Initial canvas coordinates of a node. The renderer may refine these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    #[serde(rename = "journeyStep")]
    Step,
    #[serde(rename = "timeline")]
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    #[serde(rename = "flow")]
    Flow,
    #[serde(rename = "timeline")]
    Timeline,
}

/// Payload of a primary node: everything the step card displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepNodeData {
    pub step_id: String,
    pub index: usize,
    pub title: String,
    pub description: String,
    pub phase: String,
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub active: bool,
}

/// Payload of an export-only timeline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineNodeData {
    pub step_id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Step(StepNodeData),
    Timeline(TimelineNodeData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

impl GraphNode {
    /// The step this node represents, for both primary and timeline nodes.
    pub fn step_id(&self) -> &str {
        match &self.data {
            NodeData::Step(d) => &d.step_id,
            NodeData::Timeline(d) => &d.step_id,
        }
    }

    pub fn is_active(&self) -> bool {
        match &self.data {
            NodeData::Step(d) => d.active,
            NodeData::Timeline(_) => true,
        }
    }

    pub fn step_data(&self) -> Option<&StepNodeData> {
        match &self.data {
            NodeData::Step(d) => Some(d),
            NodeData::Timeline(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub animated: bool,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// The derived node/edge structure for one journey. Ephemeral: rebuilt on every change.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Primary nodes only, in step order.
    pub fn step_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Step)
    }

    pub fn timeline_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Timeline)
    }

    pub fn flow_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Flow)
    }

    /// Resolves a clicked node to the step it belongs to.
    pub fn step_for_node(&self, node_id: &str) -> Option<&str> {
        self.node(node_id).map(GraphNode::step_id)
    }

    /// Ids of the nodes currently marked active.
    pub fn active_step_ids(&self) -> Vec<&str> {
        self.step_nodes()
            .filter(|n| n.is_active())
            .map(GraphNode::step_id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
