use super::types::*;
use super::{GraphOptions, GraphVariant};
use crate::journey::{Journey, Step};
use ahash::AHashSet;
use itertools::Itertools;

/// Title shown for steps whose title is blank.
pub const UNTITLED_STEP: &str = "Untitled step";
/// Timeline label for steps without any metric.
pub const NO_PRIMARY_METRIC: &str = "No primary metric";

/// Builds the node/edge lists for one journey under one set of options.
pub(super) struct GraphBuilder<'a> {
    journey: &'a Journey,
    options: &'a GraphOptions,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(journey: &'a Journey, options: &'a GraphOptions) -> Self {
        Self { journey, options }
    }

    pub(super) fn build(self) -> Graph {
        let steps = &self.journey.steps;
        let with_timeline = self.options.variant == GraphVariant::Export;
        let mut ids = IdAllocator::reserving(steps.iter().map(|s| s.id.as_str()));

        let mut nodes: Vec<GraphNode> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.step_node(i, step))
            .collect();

        let timeline_ids: Vec<String> = if with_timeline {
            steps
                .iter()
                .map(|step| ids.claim(timeline_node_id(&step.id)))
                .collect()
        } else {
            Vec::new()
        };
        nodes.extend(
            steps
                .iter()
                .zip(&timeline_ids)
                .enumerate()
                .map(|(i, (step, id))| self.timeline_node(i, step, id.clone())),
        );

        let mut edges: Vec<GraphEdge> = steps
            .iter()
            .tuple_windows()
            .map(|(from, to)| {
                let id = ids.claim(format!("edge-{}-{}", from.id, to.id));
                self.flow_edge(id, from, to)
            })
            .collect();
        edges.extend(timeline_ids.iter().zip(steps).tuple_windows().map(
            |((from_node, from), (to_node, to))| GraphEdge {
                id: ids.claim(format!("timeline-edge-{}-{}", from.id, to.id)),
                source: from_node.clone(),
                target: to_node.clone(),
                label: None,
                animated: false,
                kind: EdgeKind::Timeline,
            },
        ));

        Graph { nodes, edges }
    }

    fn x_for(&self, index: usize) -> f64 {
        index as f64 * self.options.horizontal_gap
    }

    fn is_active(&self, step: &Step) -> bool {
        match &self.options.selected_step {
            None => true,
            Some(selected) => *selected == step.id,
        }
    }

    fn step_node(&self, index: usize, step: &Step) -> GraphNode {
        let title = if step.title.trim().is_empty() {
            UNTITLED_STEP.to_string()
        } else {
            step.title.clone()
        };

        GraphNode {
            id: step.id.clone(),
            kind: NodeKind::Step,
            position: Position::new(self.x_for(index), 0.0),
            data: NodeData::Step(StepNodeData {
                step_id: step.id.clone(),
                index,
                title,
                description: step.description.clone(),
                phase: step.phase.clone(),
                metrics: step.metrics.clone(),
                icon: step.icon.clone(),
                active: self.is_active(step),
            }),
        }
    }

    fn timeline_node(&self, index: usize, step: &Step, id: String) -> GraphNode {
        GraphNode {
            id,
            kind: NodeKind::Timeline,
            position: Position::new(self.x_for(index), self.options.timeline_y),
            data: NodeData::Timeline(TimelineNodeData {
                step_id: step.id.clone(),
                label: timeline_label(step),
            }),
        }
    }

    fn flow_edge(&self, id: String, from: &Step, to: &Step) -> GraphEdge {
        let (label, animated) = match self.options.variant {
            GraphVariant::Inline => {
                let phase = to.phase.trim();
                ((!phase.is_empty()).then(|| phase.to_string()), false)
            }
            GraphVariant::Export => (None, true),
        };
        GraphEdge {
            id,
            source: from.id.clone(),
            target: to.id.clone(),
            label,
            animated,
            kind: EdgeKind::Flow,
        }
    }
}

/// Hands out node and edge ids that are unique within one graph.
///
/// Step ids are reserved up front. A generated id that is already taken, for example
/// `timeline-a` when a step is literally called `timeline-a`, gets a `~2`, `~3`, ... suffix.
struct IdAllocator {
    used: AHashSet<String>,
}

impl IdAllocator {
    fn reserving<'s>(ids: impl Iterator<Item = &'s str>) -> Self {
        Self {
            used: ids.map(str::to_string).collect(),
        }
    }

    fn claim(&mut self, base: String) -> String {
        if !self.used.contains(&base) {
            self.used.insert(base.clone());
            return base;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}~{}", base, suffix);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Preferred id of a step's timeline node. The builder suffixes it when it is taken.
pub fn timeline_node_id(step_id: &str) -> String {
    format!("timeline-{}", step_id)
}

/// `"<label>: <value>"` of the first metric, or the placeholder.
pub fn timeline_label(step: &Step) -> String {
    step.primary_metric()
        .map(|m| m.to_string())
        .unwrap_or_else(|| NO_PRIMARY_METRIC.to_string())
}
