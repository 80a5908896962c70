use std::fmt;

/// Which end of a search an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors raised while setting up a search.
///
/// A search that runs out of cells is not an error; see
/// [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height is not positive, or the cell count overflows.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// A start or end index lies outside the grid.
    #[error("{endpoint} index {index} is outside a grid of {len} cells")]
    EndpointOutOfRange {
        endpoint: Endpoint,
        index: usize,
        len: usize,
    },
    /// An algorithm name that matches neither engine.
    #[error("unknown algorithm \u{201c}{0}\u{201d} (expected bfs or astar)")]
    UnknownAlgorithm(String),
}
