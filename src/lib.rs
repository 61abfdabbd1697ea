//! zkmeta - ZooKeeper metadata lifecycle management for BookKeeper clusters
//!
//! zkmeta keeps the znode subtree of a managed BookKeeper cluster in step
//! with the cluster's declared identity and size. Given a ZooKeeper entry
//! point, a namespace, a cluster name, and a replica count, it ensures the
//! cluster's configuration znode exists, reflects the current replica
//! count, and can be fully removed (including all descendants) at teardown.
//!
//! Every operation is self-contained: it resolves an address, opens a
//! short-lived session, does its work, and drops the session. There is no
//! connection pool and no state outlives a single call, which is what makes
//! each operation safe to retry from a reconciliation loop.
//!
//! # Modules
//!
//! - [`resolver`] - Expand `host[:port]` URIs into in-cluster endpoints
//! - [`paths`] - Canonical znode path derivation for a cluster
//! - [`session`] - ZooKeeper session establishment and the client seam
//! - [`node`] - Idempotent create and conditional update of single znodes
//! - [`subtree`] - Breadth-first enumeration and reverse-order deletion
//! - [`lifecycle`] - Caller-facing create/update/delete-all entry points
//! - [`env`] - Operator environment variable lookups
//! - [`error`] - Error types for zkmeta operations

#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod lifecycle;
pub mod node;
pub mod paths;
pub mod resolver;
pub mod session;
pub mod subtree;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Default Configuration Constants
// =============================================================================
// These constants define the defaults shared between the CLI and the
// reconciliation layer that drives this crate.

/// Default ZooKeeper entry point in `host:port` form.
///
/// Matches the client service created by the ZooKeeper operator, so a
/// cluster that does not override its URI connects to the stock deployment.
pub const DEFAULT_ZOOKEEPER_URI: &str = "zookeeper-client:2181";

/// Finalizer name attached to cluster resources by the reconciliation layer.
///
/// Its presence keeps the resource alive until
/// [`lifecycle::delete_all_znodes`] has removed the cluster's metadata.
pub const ZK_FINALIZER: &str = "cleanUpZookeeper";
