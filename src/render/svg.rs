use super::text::{escape_xml, truncate_to_width};
use super::theme::Theme;
use super::viewport::{Bounds, node_size};
use crate::graph::{EdgeKind, Graph, GraphEdge, GraphNode, NodeData, StepNodeData, TimelineNodeData};
use crate::journey::Trend;
use std::fmt::Write;

/// Space around the outermost nodes.
pub const CANVAS_PADDING: f64 = 40.0;
/// Canvas size used when the graph has no nodes.
pub const EMPTY_CANVAS: (f64, f64) = (320.0, 160.0);

const CARD_INSET: f64 = 14.0;
const MAX_CARD_METRICS: usize = 2;

/// Renders a graph to a standalone SVG document.
///
/// Node positions from the builder are used as-is and the canvas is sized to the node
/// bounds plus [`CANVAS_PADDING`]. Inactive nodes are dimmed, animated edges dashed.
pub fn render_svg(graph: &Graph, theme: &Theme) -> String {
    let (offset_x, offset_y, width, height) = match Bounds::of(graph) {
        Some(b) => (
            CANVAS_PADDING - b.min_x,
            CANVAS_PADDING - b.min_y,
            b.width() + 2.0 * CANVAS_PADDING,
            b.height() + 2.0 * CANVAS_PADDING,
        ),
        None => (0.0, 0.0, EMPTY_CANVAS.0, EMPTY_CANVAS.1),
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\" font-family=\"{font}\">",
        w = width,
        h = height,
        font = escape_xml(&theme.font_family),
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    );
    let _ = write!(
        svg,
        "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker></defs>",
        escape_xml(&theme.edge)
    );

    let _ = write!(
        svg,
        "<g transform=\"translate({:.2} {:.2})\">",
        offset_x, offset_y
    );
    for edge in &graph.edges {
        if let (Some(from), Some(to)) = (graph.node(&edge.source), graph.node(&edge.target)) {
            svg.push_str(&edge_svg(edge, from, to, theme));
        }
    }
    // With no selection every card is active and keeps the neutral border.
    let highlight = graph.step_nodes().any(|n| !n.is_active());
    for node in &graph.nodes {
        match &node.data {
            NodeData::Step(data) => svg.push_str(&step_card_svg(node, data, highlight, theme)),
            NodeData::Timeline(data) => svg.push_str(&timeline_pill_svg(node, data, theme)),
        }
    }
    svg.push_str("</g></svg>");
    svg
}

fn edge_svg(edge: &GraphEdge, from: &GraphNode, to: &GraphNode, theme: &Theme) -> String {
    let (fw, fh) = node_size(from);
    let (_, th) = node_size(to);
    let (x1, y1) = (from.position.x + fw, from.position.y + fh / 2.0);
    let (x2, y2) = (to.position.x, to.position.y + th / 2.0);

    let dash = if edge.animated {
        " stroke-dasharray=\"6 4\""
    } else {
        ""
    };
    let width = match edge.kind {
        EdgeKind::Flow => 2.0,
        EdgeKind::Timeline => 1.2,
    };

    let mut out = format!(
        "<path id=\"{}\" d=\"M {:.2} {:.2} L {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#arrow)\"{}/>",
        escape_xml(&edge.id),
        x1,
        y1,
        x2,
        y2,
        escape_xml(&theme.edge),
        width,
        dash
    );

    if let Some(label) = &edge.label {
        let size = theme.font_size * 0.8;
        let text = truncate_to_width(label, (x2 - x1).abs().max(40.0), size);
        let _ = write!(
            out,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{:.1}\" fill=\"{}\">{}</text>",
            (x1 + x2) / 2.0,
            (y1 + y2) / 2.0 - 6.0,
            size,
            escape_xml(&theme.muted_text),
            escape_xml(&text)
        );
    }
    out
}

fn step_card_svg(node: &GraphNode, data: &StepNodeData, highlight: bool, theme: &Theme) -> String {
    let (w, h) = node_size(node);
    let (x, y) = (node.position.x, node.position.y);
    let inner = w - 2.0 * CARD_INSET;
    let stroke = if data.active && highlight {
        &theme.accent
    } else {
        &theme.node_border
    };
    let opacity = if data.active {
        1.0
    } else {
        theme.inactive_opacity
    };

    let mut out = String::new();
    let _ = write!(
        out,
        "<g id=\"node-{}\" opacity=\"{}\">",
        escape_xml(&node.id),
        opacity
    );
    let _ = write!(
        out,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"12\" ry=\"12\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        x,
        y,
        w,
        h,
        escape_xml(&theme.node_background),
        escape_xml(stroke)
    );

    let title_size = theme.font_size * 1.1;
    let small = theme.font_size * 0.8;
    let mut line_y = y + CARD_INSET + title_size;

    if !data.phase.trim().is_empty() {
        let phase = truncate_to_width(&data.phase.to_uppercase(), inner, small);
        let _ = write!(
            out,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" fill=\"{}\">{}</text>",
            x + CARD_INSET,
            y + CARD_INSET + small,
            small,
            escape_xml(&theme.accent),
            escape_xml(&phase)
        );
        line_y += small + 4.0;
    }

    let title = truncate_to_width(&format!("{}. {}", data.index + 1, data.title), inner, title_size);
    let _ = write!(
        out,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        x + CARD_INSET,
        line_y,
        title_size,
        escape_xml(&theme.text),
        escape_xml(&title)
    );

    for metric in data.metrics.iter().take(MAX_CARD_METRICS) {
        line_y += small + 8.0;
        let text = format!("{} {}", metric, trend_glyph(metric.trend));
        let text = truncate_to_width(text.trim_end(), inner, small);
        let _ = write!(
            out,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" fill=\"{}\">{}</text>",
            x + CARD_INSET,
            line_y,
            small,
            escape_xml(&theme.muted_text),
            escape_xml(&text)
        );
    }

    out.push_str("</g>");
    out
}

fn timeline_pill_svg(node: &GraphNode, data: &TimelineNodeData, theme: &Theme) -> String {
    let (w, h) = node_size(node);
    let (x, y) = (node.position.x, node.position.y);
    let size = theme.font_size * 0.85;
    let label = truncate_to_width(&data.label, w - 2.0 * CARD_INSET, size);
    format!(
        "<g id=\"node-{id}\"><rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"{r:.2}\" ry=\"{r:.2}\" fill=\"{fill}\" stroke=\"{stroke}\"/><text x=\"{tx:.2}\" y=\"{ty:.2}\" text-anchor=\"middle\" font-size=\"{size:.1}\" fill=\"{color}\">{label}</text></g>",
        id = escape_xml(&node.id),
        r = h / 2.0,
        fill = escape_xml(&theme.timeline_background),
        stroke = escape_xml(&theme.node_border),
        tx = x + w / 2.0,
        ty = y + h / 2.0 + size / 3.0,
        color = escape_xml(&theme.text),
        label = escape_xml(&label),
    )
}

fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Neutral => "",
    }
}
