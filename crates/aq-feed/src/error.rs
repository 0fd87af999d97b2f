use thiserror::Error;

use aq_core::CoreError;
use aq_network::NetworkError;
use aq_routing::RoutingError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("snapshot v{offered} is not newer than the published v{current}")]
    StaleSnapshot { current: u64, offered: u64 },

    #[error("could not spawn {what} thread: {source}")]
    Spawn {
        what:   &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("configuration error: {0}")]
    Core(#[from] CoreError),
}

pub type FeedResult<T> = Result<T, FeedError>;
