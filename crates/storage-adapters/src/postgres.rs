//! # Postgres post store
//!
//! Maps the `posts` table to the domain model. Each operation is a single
//! statement; concurrent writers rely on Postgres row-level consistency.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::samples::sample_posts;
use domains::{DelimitedList, Post, PostDraft, PostId, PostRepository, StorageMode};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tracing::{error, info};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        subtitle VARCHAR(255),
        content TEXT NOT NULL,
        tags TEXT,
        links TEXT,
        featured_image TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const COLUMNS: &str =
    "id, title, subtitle, content, tags, links, featured_image, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i32,
    title: String,
    subtitle: Option<String>,
    content: String,
    tags: Option<String>,
    links: Option<String>,
    featured_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            title: row.title,
            subtitle: row.subtitle,
            content: row.content,
            tags: row.tags.as_deref().and_then(DelimitedList::parse),
            links: row.links.as_deref().and_then(DelimitedList::parse),
            featured_image: row.featured_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Opens a pool and proves the server is reachable.
    ///
    /// `require_tls` forces an encrypted connection without certificate
    /// verification, which is what hosted Postgres providers expect.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
        require_tls: bool,
    ) -> anyhow::Result<Self> {
        let mut options: PgConnectOptions = url.parse()?;
        if require_tls {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the table if absent and seeds it when empty.
    ///
    /// Schema or count failures are returned to the caller (who falls back to
    /// memory). A failed seed is only logged: the table itself is usable.
    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        info!("posts table ready");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            info!("inserting sample posts");
            match self.insert_samples().await {
                Ok(()) => info!("sample posts inserted"),
                Err(e) => error!(error = ?e, "error inserting sample posts"),
            }
        }
        Ok(())
    }

    /// All-or-nothing so a half-seeded table never survives a failed boot.
    async fn insert_samples(&self) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        for draft in sample_posts() {
            // CURRENT_TIMESTAMP is fixed per transaction; seeded rows need distinct stamps.
            sqlx::query(
                "INSERT INTO posts
                     (title, subtitle, content, tags, links, featured_image, created_at, updated_at)
                 SELECT $1, $2, $3, $4, $5, $6, stamp.ts, stamp.ts
                 FROM (SELECT clock_timestamp() AS ts) AS stamp",
            )
            .bind(draft.title)
            .bind(draft.subtitle)
            .bind(draft.content)
            .bind(draft.tags.map(DelimitedList::into_inner))
            .bind(draft.links.map(DelimitedList::into_inner))
            .bind(draft.featured_image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn create(&self, draft: PostDraft) -> anyhow::Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, subtitle, content, tags, links, featured_image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(draft.title)
        .bind(draft.subtitle)
        .bind(draft.content)
        .bind(draft.tags.map(DelimitedList::into_inner))
        .bind(draft.links.map(DelimitedList::into_inner))
        .bind(draft.featured_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts
             SET title = $1, subtitle = $2, content = $3, tags = $4, links = $5,
                 featured_image = $6, updated_at = CURRENT_TIMESTAMP
             WHERE id = $7
             RETURNING {COLUMNS}"
        ))
        .bind(draft.title)
        .bind(draft.subtitle)
        .bind(draft.content)
        .bind(draft.tags.map(DelimitedList::into_inner))
        .bind(draft.links.map(DelimitedList::into_inner))
        .bind(draft.featured_image)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: PostId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Durable
    }
}
