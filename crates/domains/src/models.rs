//! # Domain Models
//!
//! The blog has a single entity, [`Post`]. Incoming payloads arrive as
//! [`PostInput`] and only become a [`PostDraft`] once they pass validation,
//! so repositories never see an unchecked title or an empty optional field.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::delimited::DelimitedList;
use crate::error::{AppError, Result};

/// Column width of `title` and `subtitle` in the durable schema.
pub const MAX_HEADING_CHARS: usize = 255;

pub const MISSING_REQUIRED_FIELDS: &str = "Title and content are required";

/// Postgres text columns cannot hold `\0`; both stores reject it up front.
pub const NUL_IN_TEXT: &str = "Text fields must not contain NUL characters";

/// Store-assigned identifier (`SERIAL` in Postgres, max-plus-one in memory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i32);

impl FromStr for PostId {
    type Err = AppError;

    /// Anything that is not a plain integer is simply a post that doesn't exist.
    fn from_str(raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<i32>()
            .map(PostId)
            .map_err(|_| AppError::post_not_found(raw))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted blog article. Field names match the stored attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub subtitle: Option<String>,
    /// Opaque HTML produced by the admin editor.
    pub content: String,
    pub tags: Option<DelimitedList>,
    pub links: Option<DelimitedList>,
    pub featured_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Materializes a draft with store-assigned identity and timestamps.
    pub fn from_draft(id: PostId, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            subtitle: draft.subtitle,
            content: draft.content,
            tags: draft.tags,
            links: draft.links,
            featured_image: draft.featured_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full-field replace. `id` and `created_at` are never touched.
    pub fn apply(&mut self, draft: PostDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.subtitle = draft.subtitle;
        self.content = draft.content;
        self.tags = draft.tags;
        self.links = draft.links;
        self.featured_image = draft.featured_image;
        self.updated_at = now;
    }

    pub fn tag_labels(&self) -> Vec<&str> {
        self.tags.as_ref().map(DelimitedList::items).unwrap_or_default()
    }

}

/// Editable fields as submitted by the admin editor.
///
/// Everything is optional at this stage; the external name `featuredImage`
/// maps to the stored `featured_image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub links: Option<String>,
    #[serde(default, rename = "featuredImage", alias = "featured_image")]
    pub featured_image: Option<String>,
}

/// A validated, normalized set of editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub tags: Option<DelimitedList>,
    pub links: Option<DelimitedList>,
    pub featured_image: Option<String>,
}

impl TryFrom<PostInput> for PostDraft {
    type Error = AppError;

    fn try_from(input: PostInput) -> Result<Self> {
        let fields = [
            &input.title,
            &input.subtitle,
            &input.content,
            &input.tags,
            &input.links,
            &input.featured_image,
        ];
        let has_nul = fields
            .into_iter()
            .flatten()
            .any(|value| value.contains('\0'));

        let title = non_blank(input.title);
        let content = input.content.filter(|c| !c.trim().is_empty());
        let (Some(title), Some(content)) = (title, content) else {
            return Err(AppError::ValidationError(MISSING_REQUIRED_FIELDS.to_string()));
        };
        if has_nul {
            return Err(AppError::ValidationError(NUL_IN_TEXT.to_string()));
        }

        let subtitle = non_blank(input.subtitle);
        check_heading_width("Title", &title)?;
        if let Some(subtitle) = &subtitle {
            check_heading_width("Subtitle", subtitle)?;
        }

        Ok(Self {
            title,
            subtitle,
            content,
            tags: input.tags.as_deref().and_then(DelimitedList::parse),
            links: input.links.as_deref().and_then(DelimitedList::parse),
            featured_image: non_blank(input.featured_image),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_heading_width(field: &str, value: &str) -> Result<()> {
    if value.chars().count() > MAX_HEADING_CHARS {
        return Err(AppError::ValidationError(format!(
            "{field} must be at most {MAX_HEADING_CHARS} characters"
        )));
    }
    Ok(())
}

/// Username/password pair presented on every admin-gated request.
///
/// The password is wrapped in [`SecretString`] so `Debug` output redacts it.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Which backend the storage selector settled on at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    Durable,
    Fallback,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Durable => f.write_str("durable"),
            StorageMode::Fallback => f.write_str("fallback"),
        }
    }
}
