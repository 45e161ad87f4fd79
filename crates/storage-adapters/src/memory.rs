//! # In-memory fallback store
//!
//! Used when durable storage is unreachable at boot. Contents live only as
//! long as the process. Ids are max-plus-one, so a deleted highest id can be
//! handed out again.
//!
//! All read-modify-write sequences run under a single `RwLock` write guard.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domains::samples::sample_posts;
use domains::{Post, PostDraft, PostId, PostRepository, StorageMode};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryPostRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    posts: Vec<Post>,
    last_stamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Wall clock, nudged forward so two writes never share a timestamp.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn next_id(&self) -> PostId {
        let max = self.posts.iter().map(|p| p.id.0).max().unwrap_or(0);
        PostId(max + 1)
    }

    fn insert(&mut self, draft: PostDraft) -> Post {
        let id = self.next_id();
        let now = self.next_stamp();
        let post = Post::from_draft(id, draft, now);
        self.posts.insert(0, post.clone());
        post
    }
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance holding the three starter articles (ids 1..=3).
    pub fn seeded() -> Self {
        let mut state = MemoryState::default();
        for draft in sample_posts() {
            state.insert(draft);
        }
        tracing::info!(count = state.posts.len(), "in-memory post store seeded");
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let mut posts = self.state.read().await.posts.clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        let state = self.state.read().await;
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: PostDraft) -> anyhow::Result<Post> {
        let mut state = self.state.write().await;
        Ok(state.insert(draft))
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> anyhow::Result<Option<Post>> {
        let mut state = self.state.write().await;
        let now = state.next_stamp();
        let Some(post) = state.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.apply(draft, now);
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        Ok(state.posts.len() != before)
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::PostInput;
    use std::sync::Arc;

    fn draft(title: &str) -> PostDraft {
        PostDraft::try_from(PostInput {
            title: Some(title.into()),
            content: Some("<p>body</p>".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn seeded_store_holds_samples_newest_first() {
        let repo = InMemoryPostRepository::seeded();
        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn ids_are_max_plus_one() {
        let repo = InMemoryPostRepository::seeded();
        assert!(repo.delete(PostId(2)).await.unwrap());
        assert_eq!(repo.create(draft("four")).await.unwrap().id, PostId(4));

        assert!(repo.delete(PostId(4)).await.unwrap());
        assert_eq!(repo.create(draft("again")).await.unwrap().id, PostId(4));
    }

    #[tokio::test]
    async fn timestamps_strictly_increase() {
        let repo = InMemoryPostRepository::new();
        for i in 0..20 {
            repo.create(draft(&format!("post {i}"))).await.unwrap();
        }
        let posts = repo.list().await.unwrap();
        assert!(posts.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(draft("first")).await.unwrap();
        let updated = repo.update(created.id, draft("second")).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.title, "second");
    }

    #[tokio::test]
    async fn unknown_ids_are_reported_as_absent() {
        let repo = InMemoryPostRepository::new();
        assert_eq!(repo.get(PostId(1)).await.unwrap(), None);
        assert_eq!(repo.update(PostId(1), draft("x")).await.unwrap(), None);
        assert!(!repo.delete(PostId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_creates_get_unique_ids() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(draft(&format!("p{i}"))).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(repo.list().await.unwrap().len(), 32);
    }
}
