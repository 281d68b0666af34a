//! Student DTOs.

use chrono::{DateTime, Utc};
use edublog_core::domain::StudentProfile;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::validation::not_blank;

/// Request to create a student together with their login account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
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
    pub enrollment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Row of the student listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentProfile> for StudentListItem {
    fn from(profile: StudentProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            enrollment: profile.enrollment,
            grade: profile.grade,
            created_at: profile.created_at,
        }
    }
}

/// The stored student, returned by detail, create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentProfile> for StudentResponse {
    fn from(profile: StudentProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            enrollment: profile.enrollment,
            grade: profile.grade,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
