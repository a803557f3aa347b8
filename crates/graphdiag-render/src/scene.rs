//! Everything about a drawing that does not depend on fetched icons: clipped edge shapes,
//! label placements and fonts, and the viewport.

use crate::bounds::{Bounds, union_all, view_scale};
use crate::edges::{EdgeShape, edge_shape};
use crate::geometry::{Circle, QuadBezier};
use crate::label::{
    NODE_LABEL_GAP, StraightLabel, curved_label_path, edge_font_size, node_font_size, text_width,
};
use crate::options::{EdgeStyle, RenderOptions};
use crate::path::PathData;
use graphdiag_core::geom::point;
use graphdiag_core::{EdgeKind, GraphModel, curvature_multipliers, parallel_group_sizes};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeItem {
    pub id: String,
    pub circle: Circle,
    pub color: String,
    pub icon: Option<String>,
    pub label: Option<NodeLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeItem {
    /// Index of the edge in the model.
    pub index: usize,
    pub kind: EdgeKind,
    pub path: PathData,
    pub label: Option<EdgeLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub text: String,
    pub font_size: f64,
    pub placement: LabelPlacement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelPlacement {
    Straight(StraightLabel),
    /// Text follows this curve.
    Curved(QuadBezier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<NodeItem>,
    pub edges: Vec<EdgeItem>,
    /// Final viewport, labels and padding included.
    pub bounds: Bounds,
    /// Reference-display scale the label fonts were judged against.
    pub scale: f64,
}

/// Kind an edge is drawn as: parallel edges and the curved edge style force curves.
pub fn effective_kind(kind: EdgeKind, style: EdgeStyle, group_size: usize) -> EdgeKind {
    if style == EdgeStyle::Curved || group_size > 1 {
        kind.to_curved()
    } else {
        kind
    }
}

struct PendingEdge {
    index: usize,
    kind: EdgeKind,
    multiplier: f64,
    thickness: f64,
    source: Circle,
    target: Circle,
    shape: EdgeShape,
}

impl Scene {
    pub fn build(graph: &GraphModel, options: &RenderOptions) -> Scene {
        if graph.is_empty() {
            return Scene {
                nodes: Vec::new(),
                edges: Vec::new(),
                bounds: Bounds::EMPTY_VIEWPORT,
                scale: 1.0,
            };
        }

        let mut circles: FxHashMap<&str, Circle> = FxHashMap::default();
        for node in graph.nodes.values() {
            let center = node.position.unwrap_or_else(|| {
                tracing::debug!(node = %node.id, "node has no position; drawing at origin");
                point(0.0, 0.0)
            });
            circles.insert(node.id.as_str(), Circle::new(center, node.size.max(0.0)));
        }

        let multipliers = curvature_multipliers(&graph.edges);
        let group_sizes = parallel_group_sizes(&graph.edges);
        let mut pending = Vec::new();
        for (index, edge) in graph.edges.iter().enumerate() {
            let (Some(&source), Some(&target)) = (
                circles.get(edge.source.as_str()),
                circles.get(edge.target.as_str()),
            ) else {
                tracing::debug!(edge = %edge.id, "edge endpoint missing; skipped");
                continue;
            };
            let kind = effective_kind(edge.kind, options.edge_style, group_sizes[index]);
            let multiplier = multipliers[index];
            let Some(shape) = edge_shape(&source, &target, kind, edge.weight, multiplier) else {
                tracing::debug!(edge = %edge.id, "endpoint circles overlap; skipped");
                continue;
            };
            pending.push(PendingEdge {
                index,
                kind,
                multiplier,
                thickness: edge.weight,
                source,
                target,
                shape,
            });
        }

        let node_boxes = circles
            .values()
            .map(|c| Bounds::around(c.center, c.radius, c.radius));
        let curve_boxes = pending.iter().filter_map(|p| {
            let ctrl = p.shape.ctrl?;
            let apex = QuadBezier::new(p.source.center, ctrl, p.target.center).at(0.5);
            Some(Bounds::around(apex, p.thickness / 2.0, p.thickness / 2.0))
        });
        let geometry = union_all(node_boxes.chain(curve_boxes)).unwrap_or(Bounds::EMPTY_VIEWPORT);
        let scale = view_scale(&geometry, options.padding, &options.labels);
        let label_opts = &options.labels;

        let mut extents = geometry;
        let mut nodes = Vec::with_capacity(graph.nodes.len());
        for node in graph.nodes.values() {
            let circle = circles[node.id.as_str()];
            let text = node.display_label();
            let label = node_font_size(text, circle.radius, scale, label_opts).map(|font_size| {
                let x = circle.center.x + circle.radius + NODE_LABEL_GAP;
                let width = text_width(text, font_size, label_opts);
                extents = extents.union(&Bounds {
                    min_x: x,
                    min_y: circle.center.y - font_size / 2.0,
                    max_x: x + width,
                    max_y: circle.center.y + font_size / 2.0,
                });
                NodeLabel {
                    text: text.to_string(),
                    x,
                    y: circle.center.y + font_size / 3.0,
                    font_size,
                }
            });
            let color = if node.color.trim().is_empty() {
                options.default_node_color.clone()
            } else {
                node.color.clone()
            };
            nodes.push(NodeItem {
                id: node.id.clone(),
                circle,
                color,
                icon: node.icon.clone().filter(|href| !href.trim().is_empty()),
                label,
            });
        }

        let mut edges = Vec::with_capacity(pending.len());
        for p in pending {
            let edge = &graph.edges[p.index];
            let label = edge
                .label
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .and_then(|text| {
                    let length = (p.shape.end - p.shape.start).length();
                    let font_size = edge_font_size(text, length, p.thickness, scale, label_opts)?;
                    let width = text_width(text, font_size, label_opts);
                    let placement = if p.shape.is_curved() {
                        let path = curved_label_path(
                            p.source.center,
                            p.target.center,
                            p.multiplier,
                            p.thickness,
                        );
                        extents = extents.union(&Bounds::around(path.at(0.5), font_size, font_size));
                        LabelPlacement::Curved(path)
                    } else {
                        let placed = StraightLabel::place(p.shape.start, p.shape.end, p.thickness);
                        extents = extents.union(&placed.bounds(width, font_size));
                        LabelPlacement::Straight(placed)
                    };
                    Some(EdgeLabel {
                        text: text.to_string(),
                        font_size,
                        placement,
                    })
                });
            edges.push(EdgeItem {
                index: p.index,
                kind: p.kind,
                path: p.shape.path,
                label,
            });
        }

        Scene {
            nodes,
            edges,
            bounds: extents.padded(options.padding),
            scale,
        }
    }
}
