use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid tree node: {0}")]
    InvalidNode(String),

    #[error("Node of type {0:?} cannot hold children")]
    NoChildren(String),

    #[error("Invalid lookup pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
