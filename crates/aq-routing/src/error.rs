use thiserror::Error;

use aq_core::{CoreError, NodeId};
use aq_network::NetworkError;

/// Errors produced by `aq-routing`.
///
/// An unreachable target is not an error: it is a
/// [`RouteResult`](crate::RouteResult) with `found == false`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} is not part of the network")]
    InvalidNode(NodeId),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
