//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired in by the binary.

use async_trait::async_trait;

use crate::models::{Credentials, Post, PostDraft, PostId, StorageMode};

/// Data persistence contract for posts.
///
/// The durable and in-memory adapters must be indistinguishable to callers
/// apart from `mode()`: same ordering, same absent-vs-found semantics.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `created_at` first.
    async fn list(&self) -> anyhow::Result<Vec<Post>>;
    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>>;
    async fn create(&self, draft: PostDraft) -> anyhow::Result<Post>;
    /// Returns `None` when no post has this id.
    async fn update(&self, id: PostId, draft: PostDraft) -> anyhow::Result<Option<Post>>;
    /// Returns `false` when no post has this id.
    async fn delete(&self, id: PostId) -> anyhow::Result<bool>;

    fn mode(&self) -> StorageMode;
}

/// Admin credential check.
///
/// A shared secret today; anything that can answer yes/no for a
/// username/password pair fits here.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> bool;
}
