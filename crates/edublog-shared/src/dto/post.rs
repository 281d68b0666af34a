//! Post DTOs: the public read side plus the professor's authoring side.

use chrono::{DateTime, Utc};
use edublog_core::domain::{Post, PostDetailView, PostPreview, PostTitle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::validation::not_blank;

/// Request to create a post. `published` defaults to true when absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(min = 50, message = "Content must be at least 50 characters"))]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Partial update of a post; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(min = 50, message = "Content must be at least 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Row of the public post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: PostAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
}

impl From<PostPreview> for PostListItem {
    fn from(preview: PostPreview) -> Self {
        Self {
            id: preview.id,
            title: preview.title,
            description: preview.description,
            created_at: preview.created_at,
            author: PostAuthor {
                id: preview.author_id,
                name: preview.author_name,
            },
        }
    }
}

/// Full post as the public detail endpoint renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: PostDetailAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailAuthor {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
}

impl From<PostDetailView> for PostDetailResponse {
    fn from(view: PostDetailView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            content: view.content,
            description: view.description,
            published: view.published,
            created_at: view.created_at,
            updated_at: view.updated_at,
            author: PostDetailAuthor {
                id: view.author_id,
                name: view.author_name,
                bio: view.author_bio,
            },
        }
    }
}

/// Row of a professor's own listing; drafts show up here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPostItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for MyPostItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// The stored post, returned after create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Id/title pair listed on a professor's detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTitleItem {
    pub id: Uuid,
    pub title: String,
}

impl From<PostTitle> for PostTitleItem {
    fn from(title: PostTitle) -> Self {
        Self {
            id: title.id,
            title: title.title,
        }
    }
}
