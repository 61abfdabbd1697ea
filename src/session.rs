//! ZooKeeper session establishment and the client seam
//!
//! Sessions are short-lived: [`connect`] opens one for the duration of a
//! single operation and the handle closes its connection when dropped,
//! which covers every exit path including `?` early returns. Retry policy
//! belongs to the caller; nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::net::lookup_host;
use tokio::time::timeout;
use tokio_zookeeper::error as zk_error;
use tokio_zookeeper::{Acl, CreateMode, ZooKeeper};
use tracing::debug;

use crate::error::Error;
use crate::Result;

/// How long to wait for a session before giving up.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait abstracting the ZooKeeper round trips used by this crate
///
/// This trait allows mocking the coordination service in tests while using
/// a live session in production. Every method is a single round trip that
/// suspends until response or failure.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ZkClient: Send + Sync {
    /// Check whether a znode exists.
    ///
    /// Returns the node's current version when present and `None` when
    /// absent; absence is a normal result, not an error. An `Err` means the
    /// check itself could not be performed.
    async fn exists(&self, path: &str) -> Result<Option<i32>>;

    /// Create a persistent, world-readable/world-writable znode.
    ///
    /// Fails if the node already exists or an ancestor is missing; the
    /// existence-aware no-op lives in [`node::create_node`](crate::node::create_node).
    async fn create(&self, path: &str, payload: &[u8]) -> Result<()>;

    /// Overwrite a znode's payload, conditioned on `version`.
    ///
    /// A stale version fails with
    /// [`Error::VersionConflict`](crate::Error::VersionConflict).
    async fn set_data(&self, path: &str, version: i32, payload: &[u8]) -> Result<()>;

    /// List the direct children of a znode, as bare child names.
    async fn children(&self, path: &str) -> Result<Vec<String>>;

    /// Delete a znode regardless of its version.
    ///
    /// Fails if the node does not exist or still has children.
    async fn delete(&self, path: &str) -> Result<()>;
}

/// Live ZooKeeper session implementing [`ZkClient`]
///
/// Holds the handle to a connected session; dropping it releases the
/// connection.
pub struct ZkClientImpl {
    zk: ZooKeeper,
}

/// Open a session to the coordination service at `endpoint`.
///
/// The endpoint is resolved to a socket address first, then connected with
/// a bound of [`CONNECT_TIMEOUT`]. Failure to resolve, to connect, or to
/// connect in time all surface as
/// [`Error::Connection`](crate::Error::Connection) carrying the endpoint.
pub async fn connect(endpoint: &str) -> Result<ZkClientImpl> {
    let addr = lookup_host(endpoint)
        .await
        .map_err(|e| Error::connection(format!("failed to resolve zookeeper ({endpoint}): {e}")))?
        .next()
        .ok_or_else(|| Error::connection(format!("no address found for zookeeper ({endpoint})")))?;

    let (zk, _default_watcher) = timeout(CONNECT_TIMEOUT, ZooKeeper::connect(&addr))
        .await
        .map_err(|_| {
            Error::connection(format!(
                "timed out connecting to zookeeper ({endpoint}) after {}s",
                CONNECT_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| Error::connection(format!("failed to connect to zookeeper ({endpoint}): {e}")))?;

    debug!(endpoint, "zookeeper session established");
    Ok(ZkClientImpl { zk })
}

#[async_trait]
impl ZkClient for ZkClientImpl {
    async fn exists(&self, path: &str) -> Result<Option<i32>> {
        let stat = self.zk.exists(path).await.map_err(|e| {
            Error::coordination(format!("failed to check if zookeeper path {path} exists: {e}"))
        })?;
        Ok(stat.map(|s| s.version))
    }

    async fn create(&self, path: &str, payload: &[u8]) -> Result<()> {
        self.zk
            .create(
                path,
                payload.to_vec(),
                Acl::open_unsafe(),
                CreateMode::Persistent,
            )
            .await
            .map_err(|e| Error::coordination(format!("failed to create znode ({path}): {e}")))?
            .map_err(|e| Error::coordination(format!("failed to create znode ({path}): {e}")))?;
        Ok(())
    }

    async fn set_data(&self, path: &str, version: i32, payload: &[u8]) -> Result<()> {
        match self.zk.set_data(path, Some(version), payload.to_vec()).await {
            Ok(Ok(_stat)) => Ok(()),
            Ok(Err(zk_error::SetData::BadVersion { .. })) => {
                Err(Error::version_conflict(format!(
                    "znode ({path}) was modified concurrently, version {version} is stale"
                )))
            }
            Ok(Err(e)) => Err(Error::coordination(format!(
                "failed to update znode ({path}): {e}"
            ))),
            Err(e) => Err(Error::coordination(format!(
                "failed to update znode ({path}): {e}"
            ))),
        }
    }

    async fn children(&self, path: &str) -> Result<Vec<String>> {
        let children = self
            .zk
            .get_children(path)
            .await
            .map_err(|e| Error::coordination(format!("failed to list children of {path}: {e}")))?;
        children.ok_or_else(|| Error::coordination(format!("znode ({path}) does not exist")))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.zk
            .delete(path, None)
            .await
            .map_err(|e| Error::coordination(format!("failed to delete znode ({path}): {e}")))?
            .map_err(|e| Error::coordination(format!("failed to delete znode ({path}): {e}")))?;
        Ok(())
    }
}
