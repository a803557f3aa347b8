use crate::colors::DEFAULT_NODE_COLOR;
use crate::error::{Error, Result};
use crate::geom::Point;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_TITLE: &str = "Graph Diagram";
pub const DEFAULT_NODE_SIZE: f64 = 10.0;
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Spread between neighbouring edges of a parallel group.
pub const CURVATURE_STEP: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Node,
    Person,
    Group,
    Tag,
    Message,
    Location,
    Document,
    Company,
    Concept,
    Book,
    Education,
}

impl NodeKind {
    pub const ALL: [NodeKind; 11] = [
        NodeKind::Node,
        NodeKind::Person,
        NodeKind::Group,
        NodeKind::Tag,
        NodeKind::Message,
        NodeKind::Location,
        NodeKind::Document,
        NodeKind::Company,
        NodeKind::Concept,
        NodeKind::Book,
        NodeKind::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Node => "node",
            NodeKind::Person => "person",
            NodeKind::Group => "group",
            NodeKind::Tag => "tag",
            NodeKind::Message => "message",
            NodeKind::Location => "location",
            NodeKind::Document => "document",
            NodeKind::Company => "company",
            NodeKind::Concept => "concept",
            NodeKind::Book => "book",
            NodeKind::Education => "education",
        }
    }

    /// Icon reference attached to nodes declared with this keyword.
    ///
    /// The references are opaque to the parser; the renderer resolves them through its icon
    /// fetcher (the bundled fetcher ships an asset for each of them).
    pub fn icon(self) -> Option<&'static str> {
        match self {
            NodeKind::Node => None,
            NodeKind::Person => Some("icons/person.svg"),
            NodeKind::Group => Some("icons/group.svg"),
            NodeKind::Tag => Some("icons/tag.svg"),
            NodeKind::Message => Some("icons/message.svg"),
            NodeKind::Location => Some("icons/location.svg"),
            NodeKind::Document => Some("icons/document.svg"),
            NodeKind::Company => Some("icons/company.svg"),
            NodeKind::Concept => Some("icons/concept.svg"),
            NodeKind::Book => Some("icons/book.svg"),
            NodeKind::Education => Some("icons/education.svg"),
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(word))
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_keyword(s.trim()).ok_or_else(|| Error::UnknownNodeKind {
            name: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: NodeKind,
    pub size: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl Node {
    /// A node created implicitly by an edge endpoint.
    pub fn implicit(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: NodeKind::Node,
            size: DEFAULT_NODE_SIZE,
            color: DEFAULT_NODE_COLOR.to_string(),
            icon: None,
            position: None,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    Line,
    Arrow,
    DoubleArrow,
    Curved,
    CurvedArrow,
    CurvedDoubleArrow,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Line => "line",
            EdgeKind::Arrow => "arrow",
            EdgeKind::DoubleArrow => "doubleArrow",
            EdgeKind::Curved => "curved",
            EdgeKind::CurvedArrow => "curvedArrow",
            EdgeKind::CurvedDoubleArrow => "curvedDoubleArrow",
        }
    }

    pub fn is_curved(self) -> bool {
        matches!(
            self,
            EdgeKind::Curved | EdgeKind::CurvedArrow | EdgeKind::CurvedDoubleArrow
        )
    }

    /// `(start, end)` arrowhead flags.
    pub fn arrow_heads(self) -> (bool, bool) {
        match self {
            EdgeKind::Line | EdgeKind::Curved => (false, false),
            EdgeKind::Arrow | EdgeKind::CurvedArrow => (false, true),
            EdgeKind::DoubleArrow | EdgeKind::CurvedDoubleArrow => (true, true),
        }
    }

    pub fn to_curved(self) -> Self {
        match self {
            EdgeKind::Line => EdgeKind::Curved,
            EdgeKind::Arrow => EdgeKind::CurvedArrow,
            EdgeKind::DoubleArrow => EdgeKind::CurvedDoubleArrow,
            curved => curved,
        }
    }

    pub fn to_straight(self) -> Self {
        match self {
            EdgeKind::Curved => EdgeKind::Line,
            EdgeKind::CurvedArrow => EdgeKind::Arrow,
            EdgeKind::CurvedDoubleArrow => EdgeKind::DoubleArrow,
            straight => straight,
        }
    }
}

impl FromStr for EdgeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s.trim() {
            "line" => EdgeKind::Line,
            "arrow" => EdgeKind::Arrow,
            "doubleArrow" => EdgeKind::DoubleArrow,
            "curved" => EdgeKind::Curved,
            "curvedArrow" => EdgeKind::CurvedArrow,
            "curvedDoubleArrow" => EdgeKind::CurvedDoubleArrow,
            other => {
                return Err(Error::UnknownEdgeKind {
                    name: other.to_string(),
                });
            }
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Thickness of the drawn edge.
    pub weight: f64,
    pub kind: EdgeKind,
    /// Fan-out multiplier within a group of parallel edges (0 for a lone edge).
    #[serde(default)]
    pub curvature: f64,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        weight: f64,
        label: Option<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
            label,
            weight: weight.max(DEFAULT_EDGE_WEIGHT),
            kind,
            curvature: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub title: String,
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl Default for GraphModel {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Inserts `node`, replacing (but keeping the insertion slot of) an earlier record.
    pub fn upsert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Returns the node with `id`, creating a default one first if it does not exist.
    pub fn ensure_node(&mut self, id: &str) -> &mut Node {
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| Node::implicit(id))
    }

    /// Adds an edge, auto-creating missing endpoints.
    pub fn push_edge(&mut self, edge: Edge) {
        self.ensure_node(&edge.source);
        self.ensure_node(&edge.target);
        self.edges.push(edge);
    }

    /// Edges whose endpoints both exist. The parser never produces dangling edges, but models
    /// deserialized from elsewhere might.
    pub fn connected_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| self.nodes.contains_key(&e.source) && self.nodes.contains_key(&e.target))
    }

    /// Writes [`curvature_multipliers`] into every edge.
    pub fn assign_curvature(&mut self) {
        let multipliers = curvature_multipliers(&self.edges);
        for (edge, m) in self.edges.iter_mut().zip(multipliers) {
            edge.curvature = m;
        }
    }

    pub fn clear_positions(&mut self) {
        for node in self.nodes.values_mut() {
            node.position = None;
        }
    }
}

/// Per-edge fan-out multipliers.
///
/// Edges are grouped by their ordered `(source, target)` pair; edge `i` of a group of `n` gets
/// `(i - (n - 1) / 2) * 0.8`, so a group is symmetric around zero and a lone edge gets 0.
pub fn curvature_multipliers(edges: &[Edge]) -> Vec<f64> {
    let mut groups: FxHashMap<(&str, &str), Vec<usize>> = FxHashMap::default();
    for (idx, e) in edges.iter().enumerate() {
        groups
            .entry((e.source.as_str(), e.target.as_str()))
            .or_default()
            .push(idx);
    }

    let mut out = vec![0.0; edges.len()];
    for members in groups.values() {
        let n = members.len();
        if n < 2 {
            continue;
        }
        let center = (n as f64 - 1.0) / 2.0;
        for (i, &edge_idx) in members.iter().enumerate() {
            out[edge_idx] = (i as f64 - center) * CURVATURE_STEP;
        }
    }
    out
}

/// Number of edges sharing each edge's ordered `(source, target)` pair.
pub fn parallel_group_sizes(edges: &[Edge]) -> Vec<usize> {
    let mut counts: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    for e in edges {
        *counts
            .entry((e.source.as_str(), e.target.as_str()))
            .or_default() += 1;
    }
    edges
        .iter()
        .map(|e| counts[&(e.source.as_str(), e.target.as_str())])
        .collect()
}
