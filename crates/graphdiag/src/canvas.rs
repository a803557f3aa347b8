//! Mirroring a laid-out model into an interactive canvas.

use graphdiag_core::{EdgeKind, GraphModel};
use graphdiag_render::EdgeStyle;

pub const MIN_NODE_SIZE: f64 = 5.0;
pub const MIN_EDGE_SIZE: f64 = 1.0;
pub const EDGE_COLOR: &str = "#999";

#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    pub label: String,
    pub size: f64,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub label: String,
    pub size: f64,
    pub color: String,
    pub kind: EdgeKind,
}

/// Mutation API of a drawing surface that keeps its own node/edge store.
pub trait GraphCanvas {
    fn clear(&mut self);
    fn add_node(&mut self, id: &str, attributes: NodeAttributes);
    fn add_edge(&mut self, source: &str, target: &str, attributes: EdgeAttributes);
    fn refresh(&mut self);
}

/// Replaces the canvas contents with `graph`.
///
/// Sizes are floored so tiny nodes and edges stay visible, every edge is drawn in
/// [`EDGE_COLOR`], and `style` picks the straight or curved variant of each edge kind.
pub fn sync_canvas(graph: &GraphModel, canvas: &mut dyn GraphCanvas, style: EdgeStyle) {
    canvas.clear();
    for node in graph.nodes.values() {
        let (x, y) = node.position.map_or((0.0, 0.0), |p| (p.x, p.y));
        canvas.add_node(
            &node.id,
            NodeAttributes {
                label: node.display_label().to_string(),
                size: node.size.max(MIN_NODE_SIZE),
                color: node.color.clone(),
                x,
                y,
                image: node.icon.clone(),
            },
        );
    }

    let mut skipped = 0usize;
    for edge in &graph.edges {
        if !graph.nodes.contains_key(&edge.source) || !graph.nodes.contains_key(&edge.target) {
            skipped += 1;
            continue;
        }
        let kind = match style {
            EdgeStyle::Straight => edge.kind.to_straight(),
            EdgeStyle::Curved => edge.kind.to_curved(),
        };
        canvas.add_edge(
            &edge.source,
            &edge.target,
            EdgeAttributes {
                label: edge.label.clone().unwrap_or_default(),
                size: edge.weight.max(MIN_EDGE_SIZE),
                color: EDGE_COLOR.to_string(),
                kind,
            },
        );
    }
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len() - skipped,
        skipped,
        "synced canvas"
    );
    canvas.refresh();
}
