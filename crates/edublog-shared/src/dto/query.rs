//! Query-string parameters for the listing endpoints.

use edublog_core::domain::{PageRequest, PostSort, SortOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

fn default_sort() -> PostSortField {
    PostSortField::CreatedAt
}

fn default_order() -> SortDirection {
    SortDirection::Desc
}

/// Sort key accepted by `GET /api/posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostSortField {
    CreatedAt,
    Title,
}

impl From<PostSortField> for PostSort {
    fn from(field: PostSortField) -> Self {
        match field {
            PostSortField::CreatedAt => PostSort::CreatedAt,
            PostSortField::Title => PostSort::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => SortOrder::Asc,
            SortDirection::Desc => SortOrder::Desc,
        }
    }
}

/// `GET /api/posts` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[serde(default = "default_page")]
    pub page: u64,
    #[validate(range(min = 1, max = 100, message = "Limit must be 1 to 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default = "default_sort")]
    pub order_by: PostSortField,
    #[serde(default = "default_order")]
    pub order: SortDirection,
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            order_by: default_sort(),
            order: default_order(),
        }
    }
}

impl PostListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// `GET /api/posts/search` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Search term is required"))]
    pub q: String,
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[serde(default = "default_page")]
    pub page: u64,
    #[validate(range(min = 1, max = 100, message = "Limit must be 1 to 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Plain page/limit parameters shared by the other listings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[serde(default = "default_page")]
    pub page: u64,
    #[validate(range(min = 1, max = 100, message = "Limit must be 1 to 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
