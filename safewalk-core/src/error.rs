use thiserror::Error;

use crate::{EdgeId, NodeId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node '{0}' not found in graph")]
    NodeNotFound(NodeId),
    #[error("No path between '{origin}' and '{destination}'")]
    NoPathExists {
        origin: NodeId,
        destination: NodeId,
    },
    #[error("Edge '{0}' not found in store")]
    EdgeNotFound(EdgeId),
    #[error("Severity must be within 1..=100, got {0}")]
    InvalidSeverity(i64),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Edge '{0}' kept changing concurrently, update abandoned")]
    ConcurrentUpdate(EdgeId),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// Whether the error means "nothing to route to" rather than a failure
    /// of the system itself.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NodeNotFound(_) | Error::NoPathExists { .. } | Error::EdgeNotFound(_)
        )
    }
}
