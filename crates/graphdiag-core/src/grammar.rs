//! Statement rules of the graphDiagram language.
//!
//! Each rule inspects one trimmed line and either returns a typed [`Statement`] or declines.
//! [`classify`] tries them in order (title, node, edge); a line no rule accepts is ignored by
//! the parser.

use crate::lexer::{self, Direction};
use crate::model::NodeKind;

pub const TITLE_KEYWORD: &str = "graphDiagram";

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `graphDiagram <title>`; `None` when the remainder is blank.
    Title(Option<String>),
    Node(NodeDecl),
    Edge(EdgeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub kind: NodeKind,
    pub id: String,
    pub size: Option<f64>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDecl {
    /// Endpoint the arrow leaves (left-hand side for `->`/`--`, right-hand side for `<-`).
    pub source: String,
    pub target: String,
    pub directed: bool,
    pub weight: Option<u32>,
    pub label: Option<String>,
}

pub type Rule = fn(&str) -> Option<Statement>;

pub const RULES: [Rule; 3] = [title_rule, node_rule, edge_rule];

pub fn classify(line: &str) -> Option<Statement> {
    RULES.iter().find_map(|rule| rule(line))
}

pub fn title_rule(line: &str) -> Option<Statement> {
    let rest = line.strip_prefix(TITLE_KEYWORD)?.trim();
    Some(Statement::Title(
        (!rest.is_empty()).then(|| rest.to_string()),
    ))
}

pub fn node_rule(line: &str) -> Option<Statement> {
    let mut words = lexer::words(line);
    let kind = NodeKind::from_keyword(words.next()?.text)?;
    let id = words.next()?.text.to_string();

    let mut size = None;
    let mut color = None;
    for w in words {
        if color.is_none() && w.text.starts_with('#') {
            color = Some(crate::colors::resolve_color(w.text));
        } else if size.is_none() {
            if let Ok(v) = w.text.parse::<i64>() {
                size = Some(v.max(1) as f64);
            }
        }
    }

    Some(Statement::Node(NodeDecl {
        kind,
        id,
        size,
        color,
    }))
}

pub fn edge_rule(line: &str) -> Option<Statement> {
    if !lexer::contains_edge_marker(line) {
        return None;
    }

    let (expr, label) = match line.split_once(':') {
        Some((expr, label)) => (expr, label.trim()),
        None => (line, ""),
    };
    let marker = lexer::scan_edge_marker(expr)?;
    let (left, right) = marker.split(expr);
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }

    let (source, target) = match marker.direction {
        Direction::Backward => (right, left),
        Direction::Forward | Direction::Undirected => (left, right),
    };

    Some(Statement::Edge(EdgeDecl {
        source: source.to_string(),
        target: target.to_string(),
        directed: marker.direction != Direction::Undirected,
        weight: marker.weight,
        label: (!label.is_empty()).then(|| label.to_string()),
    }))
}
