//! Single-znode lifecycle operations
//!
//! Create and update are deliberately separate rather than a single upsert:
//! creation is "ensure present, do not clobber", update assigns a new
//! payload to an existing node and never creates one. Both re-read current
//! state before acting; nothing is cached across calls.

use tracing::debug;

use crate::session::ZkClient;
use crate::Result;

/// Create `path` with `payload` unless it already exists.
///
/// A node that is already present is left untouched, original payload
/// included, and the call succeeds; repeated invocations are safe. Failures
/// other than prior existence (lost session, missing ancestor) propagate.
pub async fn create_node<C: ZkClient + ?Sized>(zk: &C, path: &str, payload: &[u8]) -> Result<()> {
    if zk.exists(path).await?.is_some() {
        debug!(path, "znode already present, nothing to create");
        return Ok(());
    }
    zk.create(path, payload).await
}

/// Write `payload` to `path` if the node exists.
///
/// The write is conditioned on the version obtained from the existence
/// check; a concurrent modification in between surfaces as
/// [`Error::VersionConflict`](crate::Error::VersionConflict), unmodified,
/// so the caller can re-read and retry. An absent node makes this a
/// successful no-op; the node is never created here.
pub async fn update_node<C: ZkClient + ?Sized>(zk: &C, path: &str, payload: &[u8]) -> Result<()> {
    match zk.exists(path).await? {
        Some(version) => zk.set_data(path, version, payload).await,
        None => {
            debug!(path, "znode absent, nothing to update");
            Ok(())
        }
    }
}
