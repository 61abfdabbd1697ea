//! Error types for zkmeta operations

use thiserror::Error;

/// Main error type for ZooKeeper metadata operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A session could not be established within the connection timeout
    #[error("connection error: {0}")]
    Connection(String),

    /// A mid-operation service-side failure (exists-check, children-list,
    /// create, delete) other than an optimistic-lock conflict
    #[error("coordination service error: {0}")]
    Coordination(String),

    /// A conditional update was rejected because the node was modified
    /// concurrently and the submitted version is stale
    #[error("version conflict: {0}")]
    VersionConflict(String),

    /// A required environment variable is missing or empty
    #[error("environment error: {0}")]
    Environment(String),
}

impl Error {
    /// Create a connection error with the given message
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a coordination service error with the given message
    pub fn coordination(msg: impl Into<String>) -> Self {
        Self::Coordination(msg.into())
    }

    /// Create a version conflict error with the given message
    pub fn version_conflict(msg: impl Into<String>) -> Self {
        Self::VersionConflict(msg.into())
    }

    /// Create an environment error with the given message
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}
