//! Professor DTOs.

use chrono::{DateTime, Utc};
use edublog_core::domain::{PostTitle, ProfessorProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::post::PostTitleItem;
use crate::dto::validation::not_blank;

/// Request to create a professor together with their login account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfessorRequest {
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfessorRequest {
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Row of the professor listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorListItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub subject: Option<String>,
    pub posts_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<ProfessorProfile> for ProfessorListItem {
    fn from(profile: ProfessorProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            bio: profile.bio,
            subject: profile.subject,
            posts_count: profile.posts_count,
            created_at: profile.created_at,
        }
    }
}

/// Professor detail, with the titles of every post they wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub subject: Option<String>,
    pub posts: Vec<PostTitleItem>,
    pub created_at: DateTime<Utc>,
}

impl ProfessorDetailResponse {
    pub fn new(profile: ProfessorProfile, posts: Vec<PostTitle>) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            bio: profile.bio,
            subject: profile.subject,
            posts: posts.into_iter().map(PostTitleItem::from).collect(),
            created_at: profile.created_at,
        }
    }
}

/// The stored professor, returned after create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfessorProfile> for ProfessorResponse {
    fn from(profile: ProfessorProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            bio: profile.bio,
            subject: profile.subject,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProfessorRequest {
        CreateProfessorRequest {
            name: "Alan Turing".into(),
            email: "alan@example.com".into(),
            password: "enigma1".into(),
            bio: None,
            subject: Some("Computability".into()),
        }
    }

    #[test]
    fn create_accepts_valid_body() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn create_rejects_short_password() {
        let mut req = valid_create();
        req.password = "12345".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn update_rejects_blank_name() {
        let req = UpdateProfessorRequest {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn list_item_serializes_posts_count() {
        let item = ProfessorListItem {
            id: Uuid::new_v4(),
            name: "Alan Turing".into(),
            email: "alan@example.com".into(),
            bio: None,
            subject: None,
            posts_count: 4,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["postsCount"], 4);
    }
}
