//! Caller-facing znode lifecycle entry points
//!
//! Each operation independently resolves an address, opens its own
//! short-lived session, performs its work, and drops the session. No
//! connection or node state is shared across calls, so every entry point
//! can be re-invoked safely after a failed attempt.

use tracing::debug;

use crate::node::{create_node, update_node};
use crate::paths::{config_path, root_path};
use crate::resolver::resolve;
use crate::session::{connect, ZkClient};
use crate::subtree::delete_subtree;
use crate::Result;

/// Render the configuration payload for a cluster of `replicas` bookies.
pub fn cluster_size_payload(replicas: i32) -> Vec<u8> {
    format!("CLUSTER_SIZE={replicas}").into_bytes()
}

/// Ensure the configuration znode for `name` exists with the given replica
/// count. An already-present node is left untouched.
pub async fn create_znode(uri: &str, namespace: &str, name: &str, replicas: i32) -> Result<()> {
    let endpoint = resolve(uri, namespace);
    debug!(endpoint = %endpoint, name, "creating configuration znode");
    let zk = connect(&endpoint).await?;
    create_znode_with(&zk, name, replicas).await
}

/// [`create_znode`] against an already-connected client.
pub async fn create_znode_with<C: ZkClient + ?Sized>(
    zk: &C,
    name: &str,
    replicas: i32,
) -> Result<()> {
    create_node(zk, &config_path(name), &cluster_size_payload(replicas)).await
}

/// Assign the latest replica count to an existing configuration znode.
/// An absent node makes this a no-op; it is never created here.
pub async fn update_znode(uri: &str, namespace: &str, name: &str, replicas: i32) -> Result<()> {
    let endpoint = resolve(uri, namespace);
    debug!(endpoint = %endpoint, name, "updating configuration znode");
    let zk = connect(&endpoint).await?;
    update_znode_with(&zk, name, replicas).await
}

/// [`update_znode`] against an already-connected client.
pub async fn update_znode_with<C: ZkClient + ?Sized>(
    zk: &C,
    name: &str,
    replicas: i32,
) -> Result<()> {
    update_node(zk, &config_path(name), &cluster_size_payload(replicas)).await
}

/// Delete every znode belonging to the cluster `name`, root included.
pub async fn delete_all_znodes(uri: &str, namespace: &str, name: &str) -> Result<()> {
    let endpoint = resolve(uri, namespace);
    debug!(endpoint = %endpoint, name, "deleting znode subtree");
    let zk = connect(&endpoint).await?;
    delete_all_znodes_with(&zk, name).await
}

/// [`delete_all_znodes`] against an already-connected client.
pub async fn delete_all_znodes_with<C: ZkClient + ?Sized>(zk: &C, name: &str) -> Result<()> {
    delete_subtree(zk, &root_path(name)).await
}
