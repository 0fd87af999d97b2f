//! Network-subsystem error type.

use thiserror::Error;

use aq_core::NodeId;

/// Errors produced by `aq-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0:?} not found in network")]
    UnknownNode(String),

    #[error("node {0:?} declared twice")]
    DuplicateNode(String),

    #[error("edge #{index} references {node}, but the network has {node_count} nodes")]
    NodeOutOfRange {
        index:      usize,
        node:       NodeId,
        node_count: usize,
    },

    #[error("malformed edge #{index}: {reason}")]
    MalformedEdge { index: usize, reason: String },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
