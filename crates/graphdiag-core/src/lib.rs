#![forbid(unsafe_code)]

//! graphDiagram language parser and graph model.
//!
//! The language is line oriented:
//!
//! ```text
//! graphDiagram <title>
//! <kind> <id> [<size>] [#<color>]
//! <src>-><tgt>[: label]
//! <src>-<W>-><tgt>[: label]
//! <src><-<tgt>[: label]
//! <src>--<tgt>[: label]
//! <src>-<W>-<tgt>[: label]
//! ```
//!
//! [`parse`] turns such text into a [`GraphModel`]; layout and rendering live in sibling crates.

pub mod colors;
pub mod error;
pub mod geom;
pub mod grammar;
pub mod lexer;
pub mod model;
mod parse;

pub use error::{Error, Result};
pub use model::{
    DEFAULT_EDGE_WEIGHT, DEFAULT_NODE_SIZE, DEFAULT_TITLE, Edge, EdgeKind, GraphModel, Node,
    NodeKind, curvature_multipliers, parallel_group_sizes,
};
pub use parse::parse;
