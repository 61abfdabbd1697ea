//! Canonical znode path derivation
//!
//! Pure path construction, no I/O. The configuration path is always a
//! descendant of the cluster root so that deleting the root subtree removes
//! every node this crate ever writes.

/// Top-level segment under which every cluster's metadata lives.
///
/// Fixed by the bookie container entrypoint, which reads its configuration
/// from this location.
pub const PRAVEGA_PATH: &str = "pravega";

/// Root znode of a cluster's metadata subtree.
pub fn root_path(name: &str) -> String {
    format!("/{}/{}", PRAVEGA_PATH, name)
}

/// Configuration znode carrying the cluster size entry.
pub fn config_path(name: &str) -> String {
    format!("{}/bookkeeper/conf", root_path(name))
}
