//! Recursive subtree deletion
//!
//! A znode cannot be deleted while it still has children, so teardown
//! happens in two passes: enumerate the whole subtree breadth-first, then
//! delete the enumeration in reverse. BFS visits shallower paths first,
//! which makes the reverse order deepest-first and guarantees every child
//! goes before its parent.

use std::collections::VecDeque;

use tracing::info;

use crate::session::ZkClient;
use crate::Result;

/// Enumerate `root` and every descendant in breadth-first order.
///
/// The traversal keeps a FIFO work queue and a separate append-only plan;
/// every visited path (including `root`) lands in the plan in visitation
/// order. A failed children lookup aborts the walk with the error — at that
/// point nothing has been deleted yet.
pub async fn list_subtree_bfs<C: ZkClient + ?Sized>(zk: &C, root: &str) -> Result<Vec<String>> {
    let mut queue = VecDeque::from([root.to_owned()]);
    let mut plan = vec![root.to_owned()];

    while let Some(path) = queue.pop_front() {
        for child in zk.children(&path).await? {
            let child_path = format!("{path}/{child}");
            queue.push_back(child_path.clone());
            plan.push(child_path);
        }
    }
    Ok(plan)
}

/// Delete `root` and every descendant.
///
/// An absent root is a successful no-op. Deletion is not atomic across the
/// subtree: the first failing delete aborts the call with the offending
/// path, nodes already removed stay removed, and a retried call
/// re-enumerates the now-smaller tree and makes forward progress.
pub async fn delete_subtree<C: ZkClient + ?Sized>(zk: &C, root: &str) -> Result<()> {
    if zk.exists(root).await?.is_none() {
        info!(root, "zookeeper metadata not found");
        return Ok(());
    }

    let plan = list_subtree_bfs(zk, root).await?;
    for path in plan.iter().rev() {
        zk.delete(path).await?;
    }

    info!(root, "zookeeper metadata deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::session::MockZkClient;
    use crate::Error;

    /// In-memory znode tree standing in for a live ensemble.
    ///
    /// Not a mockall mock because subtree deletion needs real tree state:
    /// children are derived from surviving paths, and deleting a node that
    /// still has children is refused the way the real service refuses it.
    /// That refusal is what makes the completeness tests below prove the
    /// deletion order too.
    struct FakeZk {
        nodes: Mutex<BTreeSet<String>>,
        deletions: Mutex<Vec<String>>,
        fail_once_on: Mutex<Option<String>>,
    }

    impl FakeZk {
        fn with_nodes(paths: &[&str]) -> Self {
            Self {
                nodes: Mutex::new(paths.iter().map(|p| p.to_string()).collect()),
                deletions: Mutex::new(Vec::new()),
                fail_once_on: Mutex::new(None),
            }
        }

        fn with_transient_failure_at(self, path: &str) -> Self {
            *self.fail_once_on.lock().unwrap() = Some(path.to_string());
            self
        }

        fn deletions(&self) -> Vec<String> {
            self.deletions.lock().unwrap().clone()
        }

        fn is_empty(&self) -> bool {
            self.nodes.lock().unwrap().is_empty()
        }
    }

    #[async_trait]
    impl ZkClient for FakeZk {
        async fn exists(&self, path: &str) -> Result<Option<i32>> {
            Ok(self.nodes.lock().unwrap().contains(path).then_some(0))
        }

        async fn create(&self, path: &str, _payload: &[u8]) -> Result<()> {
            self.nodes.lock().unwrap().insert(path.to_string());
            Ok(())
        }

        async fn set_data(&self, _path: &str, _version: i32, _payload: &[u8]) -> Result<()> {
            Ok(())
        }

        async fn children(&self, path: &str) -> Result<Vec<String>> {
            let nodes = self.nodes.lock().unwrap();
            if !nodes.contains(path) {
                return Err(Error::coordination(format!("znode ({path}) does not exist")));
            }
            let prefix = format!("{path}/");
            Ok(nodes
                .iter()
                .filter_map(|p| p.strip_prefix(&prefix))
                .filter(|rest| !rest.contains('/'))
                .map(str::to_string)
                .collect())
        }

        async fn delete(&self, path: &str) -> Result<()> {
            let mut fail = self.fail_once_on.lock().unwrap();
            if fail.as_deref() == Some(path) {
                fail.take();
                return Err(Error::coordination(format!(
                    "failed to delete znode ({path}): transient failure"
                )));
            }
            drop(fail);

            let mut nodes = self.nodes.lock().unwrap();
            let prefix = format!("{path}/");
            if nodes.iter().any(|p| p.starts_with(&prefix)) {
                return Err(Error::coordination(format!(
                    "failed to delete znode ({path}): node still has children"
                )));
            }
            if !nodes.remove(path) {
                return Err(Error::coordination(format!("znode ({path}) does not exist")));
            }
            self.deletions.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn sample_tree() -> FakeZk {
        // root -> {a, b}, a -> {a1}
        FakeZk::with_nodes(&[
            "/pravega/c",
            "/pravega/c/a",
            "/pravega/c/a/a1",
            "/pravega/c/b",
        ])
    }

    // ==========================================================================
    // Story: Breadth-First Enumeration
    // ==========================================================================

    /// The plan lists shallower paths before deeper ones, root first.
    #[tokio::test]
    async fn enumeration_is_breadth_first_from_the_root() {
        let zk = sample_tree();
        let plan = list_subtree_bfs(&zk, "/pravega/c").await.unwrap();
        assert_eq!(
            plan,
            vec![
                "/pravega/c",
                "/pravega/c/a",
                "/pravega/c/b",
                "/pravega/c/a/a1",
            ]
        );
    }

    /// A failed children lookup aborts the walk before anything is deleted.
    #[tokio::test]
    async fn traversal_failure_aborts_before_any_deletion() {
        let mut zk = MockZkClient::new();
        zk.expect_exists().returning(|_| Ok(Some(0)));
        zk.expect_children()
            .returning(|path| Err(Error::coordination(format!("failed to list children of {path}"))));
        zk.expect_delete().times(0);

        let err = delete_subtree(&zk, "/pravega/c").await.unwrap_err();
        assert!(matches!(err, Error::Coordination(_)));
    }

    // ==========================================================================
    // Story: Subtree Deletion
    // ==========================================================================

    /// Deleting an absent root is a successful no-op, not an error.
    #[tokio::test]
    async fn deleting_an_absent_root_is_a_noop() {
        let zk = FakeZk::with_nodes(&[]);
        delete_subtree(&zk, "/pravega/ghost").await.unwrap();
        assert!(zk.deletions().is_empty());
    }

    /// Children go strictly before their parents: a1 before a, both a and b
    /// before root.
    #[tokio::test]
    async fn deletion_order_is_deepest_first() {
        let zk = sample_tree();
        delete_subtree(&zk, "/pravega/c").await.unwrap();
        assert_eq!(
            zk.deletions(),
            vec![
                "/pravega/c/a/a1",
                "/pravega/c/b",
                "/pravega/c/a",
                "/pravega/c",
            ]
        );
    }

    /// After a successful run, neither the root nor any descendant remains.
    #[tokio::test]
    async fn deletion_removes_the_root_and_every_descendant() {
        let zk = sample_tree();
        delete_subtree(&zk, "/pravega/c").await.unwrap();
        assert!(zk.is_empty());
        assert!(zk.exists("/pravega/c").await.unwrap().is_none());
        assert!(zk.exists("/pravega/c/a/a1").await.unwrap().is_none());
    }

    /// A transient delete failure aborts the run with the offending path;
    /// the retry re-enumerates what is left and finishes the job.
    #[tokio::test]
    async fn a_retried_run_completes_after_a_transient_failure() {
        let zk = sample_tree().with_transient_failure_at("/pravega/c/a");

        let err = delete_subtree(&zk, "/pravega/c").await.unwrap_err();
        assert!(err.to_string().contains("/pravega/c/a"));
        // Nodes deleted before the failure stay deleted.
        assert_eq!(zk.deletions(), vec!["/pravega/c/a/a1", "/pravega/c/b"]);

        delete_subtree(&zk, "/pravega/c").await.unwrap();
        assert!(zk.is_empty());
    }
}
