#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown layout algorithm: {name} (expected random, circular, simple-force or force-atlas2)")]
    UnknownAlgorithm { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
