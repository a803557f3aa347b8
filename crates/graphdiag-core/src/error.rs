pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown node kind: {name}")]
    UnknownNodeKind { name: String },

    #[error("unknown edge kind: {name}")]
    UnknownEdgeKind { name: String },
}
