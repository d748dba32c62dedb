use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::model::{BlogPost, NewPost, PostId};
use crate::store::{PostStore, StoreError, StoreResult};

/// In-process post store.
///
/// Posts live behind a tokio `RwLock`: readers share, each write holds the
/// lock for the whole mutation, so a batch insert is visible all at once.
/// Records are cloned on the way out.
pub struct MemoryStore {
    name: String,
    closed: AtomicBool,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    /// Insertion sequence → post, so listing is oldest first.
    posts: BTreeMap<u64, BlogPost>,
    by_id: HashMap<PostId, u64>,
}

impl Inner {
    fn push(&mut self, post: NewPost) -> BlogPost {
        let post = BlogPost::new(PostId::generate(), post, Utc::now());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(post.id, seq);
        self.posts.insert(seq, post.clone());
        post
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::named("default")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            closed: AtomicBool::new(false),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, post: NewPost) -> StoreResult<BlogPost> {
        self.ensure_open()?;
        Ok(self.inner.write().await.push(post))
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> StoreResult<Vec<BlogPost>> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        Ok(posts.into_iter().map(|post| inner.push(post)).collect())
    }

    async fn find_all(&self) -> StoreResult<Vec<BlogPost>> {
        self.ensure_open()?;
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &PostId) -> StoreResult<Option<BlogPost>> {
        self.ensure_open()?;
        let inner = self.inner.read().await;
        Ok(inner.by_id.get(id).and_then(|seq| inner.posts.get(seq)).cloned())
    }

    async fn delete_by_id(&self, id: &PostId) -> StoreResult<bool> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        match inner.by_id.remove(id) {
            Some(seq) => Ok(inner.posts.remove(&seq).is_some()),
            None => Ok(false),
        }
    }

    async fn count(&self) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.inner.read().await.posts.len())
    }

    async fn drop_all(&self) -> StoreResult<()> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        inner.posts.clear();
        inner.by_id.clear();
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn close(&self) -> StoreResult<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!(store = %self.name, "closed in-memory post store");
        }
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("name", &self.name)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
