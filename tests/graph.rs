//! Tests for the journey graph builder and the SVG renderer.
mod common;
use common::*;
use journeymap::graph::{NO_PRIMARY_METRIC, UNTITLED_STEP};
use journeymap::prelude::*;

#[test]
fn test_inline_graph_shape() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::inline());

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    assert!(graph.timeline_nodes().next().is_none());

    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    for (i, node) in graph.nodes.iter().enumerate() {
        assert_eq!(node.position, Position::new(i as f64 * HORIZONTAL_GAP, 0.0));
        assert_eq!(node.kind, NodeKind::Step);
    }
}

#[test]
fn test_edges_connect_consecutive_steps_with_target_phase() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::inline());

    let edge_ab = &graph.edges[0];
    assert_eq!(edge_ab.id, "edge-a-b");
    assert_eq!((edge_ab.source.as_str(), edge_ab.target.as_str()), ("a", "b"));
    assert_eq!(edge_ab.label.as_deref(), Some("Signup"));
    assert!(!edge_ab.animated);

    let edge_bc = &graph.edges[1];
    assert_eq!(edge_bc.id, "edge-b-c");
    assert_eq!(edge_bc.label.as_deref(), Some("Activation"));
}

#[test]
fn test_selection_marks_single_active_node() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::inline().with_selection(Some("b")));
    assert_eq!(graph.active_step_ids(), vec!["b"]);

    let none_selected = build_graph(&journey, &GraphOptions::inline());
    assert_eq!(none_selected.active_step_ids(), vec!["a", "b", "c"]);

    // An id that matches nothing leaves every node inactive.
    let unknown = build_graph(&journey, &GraphOptions::inline().with_selection(Some("zzz")));
    assert!(unknown.active_step_ids().is_empty());
}

#[test]
fn test_empty_and_single_step_journeys() {
    let empty = Journey::new("empty", "Nothing yet");
    let graph = build_graph(&empty, &GraphOptions::export());
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());

    let single = Journey::new("one", "One").with_step(Step::new("only", "Only"));
    let graph = build_graph(&single, &GraphOptions::export());
    assert_eq!(graph.step_nodes().count(), 1);
    assert_eq!(graph.timeline_nodes().count(), 1);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_export_variant_adds_timeline_lane() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::export());

    assert_eq!(graph.nodes.len(), 6);
    assert_eq!(graph.edges.len(), 4);

    let timeline: Vec<_> = graph.timeline_nodes().collect();
    assert_eq!(timeline[0].id, "timeline-a");
    assert_eq!(timeline[0].position, Position::new(0.0, TIMELINE_Y));
    assert_eq!(timeline[2].position, Position::new(2.0 * HORIZONTAL_GAP, TIMELINE_Y));

    let labels: Vec<String> = timeline
        .iter()
        .map(|n| match &n.data {
            NodeData::Timeline(d) => d.label.clone(),
            NodeData::Step(_) => panic!("expected a timeline node"),
        })
        .collect();
    assert_eq!(labels, vec!["Visits: 1,000", "Signups: 250", NO_PRIMARY_METRIC]);

    let timeline_edges: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Timeline)
        .collect();
    assert_eq!(timeline_edges[0].id, "timeline-edge-a-b");
    assert_eq!(timeline_edges[0].source, "timeline-a");
    assert_eq!(timeline_edges[0].target, "timeline-b");

    for edge in graph.flow_edges() {
        assert!(edge.animated);
        assert!(edge.label.is_none());
    }
}

#[test]
fn test_blank_title_uses_placeholder() {
    let journey = Journey::new("j", "J")
        .with_step(Step::new("s1", "   "))
        .with_step(Step::new("s2", "Named"));
    let graph = build_graph(&journey, &GraphOptions::inline());
    let titles: Vec<_> = graph
        .step_nodes()
        .filter_map(|n| n.step_data())
        .map(|d| d.title.as_str())
        .collect();
    assert_eq!(titles, vec![UNTITLED_STEP, "Named"]);
    // Blank phase on the target means an unlabeled edge.
    assert!(graph.edges[0].label.is_none());
}

#[test]
fn test_build_is_deterministic() {
    let journey = create_abc_journey();
    let options = GraphOptions::export().with_selection(Some("c"));
    assert_eq!(build_graph(&journey, &options), build_graph(&journey, &options));
}

#[test]
fn test_custom_spacing() {
    let journey = create_abc_journey();
    let graph = build_graph(
        &journey,
        &GraphOptions::export()
            .with_horizontal_gap(100.0)
            .with_timeline_y(50.0),
    );
    assert_eq!(graph.node("c").map(|n| n.position.x), Some(200.0));
    assert_eq!(graph.node("timeline-b").map(|n| n.position.y), Some(50.0));
}

#[test]
fn test_timeline_node_resolves_to_step() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::export());
    assert_eq!(graph.step_for_node("timeline-b"), Some("b"));
    assert_eq!(graph.step_for_node("b"), Some("b"));
    assert_eq!(graph.step_for_node("nope"), None);
}

#[test]
fn test_graph_serializes_with_type_tags() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::export());
    let json = serde_json::to_value(&graph).unwrap();

    assert_eq!(json["nodes"][0]["type"], "journeyStep");
    assert_eq!(json["nodes"][0]["data"]["stepId"], "a");
    assert_eq!(json["nodes"][3]["type"], "timeline");
    assert_eq!(json["edges"][0]["type"], "flow");
    assert_eq!(json["edges"][0]["animated"], true);
}

#[test]
fn test_svg_contains_every_node() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::export());
    let svg = render_svg(&graph, &Theme::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    for title in ["Step A", "Step B", "Step C", NO_PRIMARY_METRIC] {
        assert!(svg.contains(title), "missing '{}'", title);
    }
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_svg_escapes_text() {
    let journey = Journey::new("x", "X").with_step(Step::new("s", "Tom & <Jerry>"));
    let svg = render_svg(&build_graph(&journey, &GraphOptions::inline()), &Theme::default());
    assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    assert!(!svg.contains("<Jerry>"));
}

#[test]
fn test_viewport_fit_and_focus() {
    let journey = create_abc_journey();
    let graph = build_graph(&journey, &GraphOptions::inline());
    let bounds = Bounds::of(&graph).unwrap();
    assert_eq!(bounds.min_x, 0.0);
    assert_eq!(bounds.max_x, 2.0 * HORIZONTAL_GAP + journeymap::render::NODE_WIDTH);

    let viewport = Viewport::fit(&bounds, 1200.0, 600.0, 20.0);
    let (left, _) = viewport.project(bounds.min_x, bounds.min_y);
    let (right, _) = viewport.project(bounds.max_x, bounds.max_y);
    assert!(left >= 20.0 - 1e-9);
    assert!((1200.0 - right - left).abs() < 1e-9);

    let focused = Viewport::focus(&graph, "b", 800.0, 600.0, 1.0).unwrap();
    let (cx, _) = focused.project(
        HORIZONTAL_GAP + journeymap::render::NODE_WIDTH / 2.0,
        0.0,
    );
    assert!((cx - 400.0).abs() < 1e-9);
    assert!(Viewport::focus(&graph, "missing", 800.0, 600.0, 1.0).is_none());
    assert!(Bounds::of(&Graph::default()).is_none());
}

#[test]
fn test_generated_ids_never_shadow_step_ids() {
    let journey = Journey::new("j", "J")
        .with_step(Step::new("a", "A"))
        .with_step(Step::new("timeline-a", "Literally named"));
    let graph = build_graph(&journey, &GraphOptions::export());

    let mut ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "timeline-a", "timeline-a~2", "timeline-timeline-a"]);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), graph.nodes.len());

    // The clicked step node still resolves to itself, its timeline node to step "a".
    assert_eq!(graph.step_for_node("timeline-a"), Some("timeline-a"));
    assert_eq!(graph.step_for_node("timeline-a~2"), Some("a"));

    for edge in &graph.edges {
        assert!(graph.node(&edge.source).is_some(), "dangling source {}", edge.source);
        assert!(graph.node(&edge.target).is_some(), "dangling target {}", edge.target);
    }
    let timeline_edge = graph
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::Timeline)
        .unwrap();
    assert_eq!(timeline_edge.source, "timeline-a~2");
    assert_eq!(timeline_edge.target, "timeline-timeline-a");
}

#[test]
fn test_edge_ids_are_unique_for_hyphenated_step_ids() {
    let journey = Journey::new("j", "J")
        .with_step(Step::new("a", "A"))
        .with_step(Step::new("b-c", "BC"))
        .with_step(Step::new("a-b", "AB"))
        .with_step(Step::new("c", "C"));
    let graph = build_graph(&journey, &GraphOptions::inline());

    let ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["edge-a-b-c", "edge-b-c-a-b", "edge-a-b-c~2"]);
    let pairs: Vec<_> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "b-c"), ("b-c", "a-b"), ("a-b", "c")]);
}
