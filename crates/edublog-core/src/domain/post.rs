use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog post. Owned by exactly one professor; only published posts show
/// up on the public read side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post for the given author.
    pub fn new(
        author_id: Uuid,
        title: String,
        description: Option<String>,
        content: String,
        published: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            description,
            content,
            published,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Sort key accepted by the public post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    CreatedAt,
    Title,
}

/// Listing projection: the post columns the index needs plus the
/// author's display name.
#[derive(Debug, Clone)]
pub struct PostPreview {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_name: String,
}

/// Detail projection, including the author's bio.
#[derive(Debug, Clone)]
pub struct PostDetailView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_bio: Option<String>,
}

/// Id/title pair shown on a professor's detail view.
#[derive(Debug, Clone)]
pub struct PostTitle {
    pub id: Uuid,
    pub title: String,
}
