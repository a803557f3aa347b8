use crate::grammar::{self, EdgeDecl, NodeDecl, Statement};
use crate::lexer;
use crate::model::{DEFAULT_EDGE_WEIGHT, DEFAULT_NODE_SIZE, Edge, EdgeKind, GraphModel, Node};

/// Parses graphDiagram text into a fresh [`GraphModel`].
///
/// Parsing never fails: lines no grammar rule accepts are skipped, and edge endpoints that
/// were never declared become default nodes.
pub fn parse(text: &str) -> GraphModel {
    let mut builder = GraphBuilder::default();
    for line in lexer::lines(text) {
        match grammar::classify(line.text) {
            Some(stmt) => builder.apply(line.number, stmt),
            None => tracing::trace!(line = line.number, text = line.text, "ignored line"),
        }
    }
    builder.finish()
}

#[derive(Default)]
struct GraphBuilder {
    graph: GraphModel,
}

impl GraphBuilder {
    fn apply(&mut self, line: usize, stmt: Statement) {
        match stmt {
            Statement::Title(title) => {
                tracing::debug!(line, ?title, "title");
                if let Some(title) = title {
                    self.graph.title = title;
                }
            }
            Statement::Node(decl) => {
                tracing::debug!(line, id = %decl.id, kind = decl.kind.as_str(), "node");
                self.declare_node(decl);
            }
            Statement::Edge(decl) => {
                tracing::debug!(
                    line,
                    source = %decl.source,
                    target = %decl.target,
                    directed = decl.directed,
                    "edge"
                );
                self.add_edge(decl);
            }
        }
    }

    fn declare_node(&mut self, decl: NodeDecl) {
        let mut node = Node::implicit(decl.id);
        node.kind = decl.kind;
        node.icon = decl.kind.icon().map(str::to_string);
        node.size = decl.size.unwrap_or(DEFAULT_NODE_SIZE);
        if let Some(color) = decl.color {
            node.color = color;
        }
        self.graph.upsert_node(node);
    }

    fn add_edge(&mut self, decl: EdgeDecl) {
        let kind = if decl.directed {
            EdgeKind::Arrow
        } else {
            EdgeKind::Line
        };
        let weight = decl.weight.map_or(DEFAULT_EDGE_WEIGHT, f64::from);
        self.graph
            .push_edge(Edge::new(decl.source, decl.target, kind, weight, decl.label));
    }

    fn finish(mut self) -> GraphModel {
        self.graph.assign_curvature();
        self.graph
    }
}
