//! Post persistence.
//!
//! [`PostStore`] is the only way the API touches records. Implementations
//! own their concurrency control: each write must be atomic per record, and
//! a closed store must fail every call instead of hanging.

mod memory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::model::{BlogPost, NewPost, PostId};

pub use memory::MemoryStore;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was closed; no further operations are accepted.
    #[error("store is closed")]
    Closed,

    /// An operation did not finish within the caller's deadline.
    #[error("{op} timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },

    /// No backend understands this database URL.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle passed to the API at construction.
pub type SharedStore = Arc<dyn PostStore>;

/// Async capability over the set of stored posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Stores one post and returns it with its assigned id.
    async fn insert(&self, post: NewPost) -> StoreResult<BlogPost>;

    /// Stores every post as one batch; either all become visible or none do.
    async fn insert_many(&self, posts: Vec<NewPost>) -> StoreResult<Vec<BlogPost>>;

    /// Every stored post, oldest first.
    async fn find_all(&self) -> StoreResult<Vec<BlogPost>>;

    /// Returns `Ok(None)` if no post has this id.
    async fn find_by_id(&self, id: &PostId) -> StoreResult<Option<BlogPost>>;

    /// Removes the post if present. Returns `true` if it existed.
    async fn delete_by_id(&self, id: &PostId) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<usize>;

    /// Removes every post.
    async fn drop_all(&self) -> StoreResult<()>;

    /// Succeeds while the store can serve requests.
    async fn ping(&self) -> StoreResult<()>;

    /// Ends the store's lifecycle. Later calls fail with [`StoreError::Closed`].
    async fn close(&self) -> StoreResult<()>;
}

/// Opens the store named by `url`.
///
/// Supported schemes: `memory://<name>`.
pub async fn connect(url: &str) -> StoreResult<SharedStore> {
    match url.strip_prefix("memory://") {
        Some(name) => {
            info!(store = name, "opened in-memory post store");
            Ok(Arc::new(MemoryStore::named(name)))
        }
        None => Err(StoreError::UnsupportedUrl(url.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_to_memory_urls() {
        let store = connect("memory://test").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_other_schemes() {
        let err = connect("mongodb://localhost/blog").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(url) if url == "mongodb://localhost/blog"));
    }
}
