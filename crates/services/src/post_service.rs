//! Post CRUD orchestration.
//!
//! Validation happens here, before any repository call, and every storage
//! failure is logged with its full chain and then collapsed into
//! `AppError::Internal` so no driver detail leaks to callers.

use std::sync::Arc;

use domains::{AppError, Post, PostDraft, PostId, PostInput, PostRepository, Result, StorageMode};
use tracing::{debug, error, info};

pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.repo.mode()
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.repo
            .list()
            .await
            .map_err(|e| storage_failure("fetching posts", e))
    }

    pub async fn get(&self, id: PostId) -> Result<Post> {
        self.repo
            .get(id)
            .await
            .map_err(|e| storage_failure("fetching post", e))?
            .ok_or_else(|| AppError::post_not_found(id))
    }

    pub async fn create(&self, input: PostInput) -> Result<Post> {
        let draft = validated(input)?;
        let post = self
            .repo
            .create(draft)
            .await
            .map_err(|e| storage_failure("creating post", e))?;

        info!(post_id = %post.id, tags = post.tag_labels().len(), "post created");
        Ok(post)
    }

    pub async fn update(&self, id: PostId, input: PostInput) -> Result<Post> {
        let draft = validated(input)?;
        let post = self
            .repo
            .update(id, draft)
            .await
            .map_err(|e| storage_failure("updating post", e))?
            .ok_or_else(|| AppError::post_not_found(id))?;

        info!(post_id = %post.id, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<()> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|e| storage_failure("deleting post", e))?;

        if !removed {
            return Err(AppError::post_not_found(id));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

fn validated(input: PostInput) -> Result<PostDraft> {
    PostDraft::try_from(input).inspect_err(|e| debug!(reason = %e, "post rejected"))
}

fn storage_failure(action: &str, err: anyhow::Error) -> AppError {
    error!(error = ?err, "error {action}");
    AppError::Internal(format!("storage failure while {action}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::MockPostRepository;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn input(title: &str, content: &str) -> PostInput {
        PostInput {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    fn stored(id: i32, draft: PostDraft) -> Post {
        Post::from_draft(PostId(id), draft, Utc::now())
    }

    #[tokio::test]
    async fn create_validates_before_touching_storage() {
        let mut repo = MockPostRepository::new();
        repo.expect_create().never();

        let service = PostService::new(Arc::new(repo));
        let err = service.create(input("", "<p>B</p>")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn create_passes_normalized_draft() {
        let mut repo = MockPostRepository::new();
        repo.expect_create()
            .withf(|draft| draft.links.is_none() && draft.featured_image.is_none())
            .times(1)
            .returning(|draft| Ok(stored(4, draft)));

        let service = PostService::new(Arc::new(repo));
        let post = assert_ok!(
            service
                .create(PostInput {
                    links: Some(String::new()),
                    featured_image: Some(" ".into()),
                    ..input("A", "<p>B</p>")
                })
                .await
        );
        assert_eq!(post.id, PostId(4));
    }

    #[tokio::test]
    async fn missing_post_maps_to_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_get().with(eq(PostId(9))).returning(|_| Ok(None));
        repo.expect_update().returning(|_, _| Ok(None));
        repo.expect_delete().returning(|_| Ok(false));

        let service = PostService::new(Arc::new(repo));
        let expected = AppError::post_not_found(9);
        assert_eq!(service.get(PostId(9)).await, Err(expected.clone()));
        assert_eq!(service.update(PostId(9), input("A", "B")).await, Err(expected.clone()));
        assert_eq!(service.delete(PostId(9)).await, Err(expected));
    }

    #[tokio::test]
    async fn storage_errors_are_opaque() {
        let mut repo = MockPostRepository::new();
        repo.expect_list()
            .returning(|| Err(anyhow::anyhow!("connection reset by peer")));

        let service = PostService::new(Arc::new(repo));
        let err = assert_err!(service.list().await);
        match err {
            AppError::Internal(msg) => assert!(!msg.contains("connection reset")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_repository_mode() {
        let mut repo = MockPostRepository::new();
        repo.expect_mode().return_const(StorageMode::Fallback);

        let service = PostService::new(Arc::new(repo));
        assert_eq!(service.storage_mode(), StorageMode::Fallback);
    }
}
