//! Authentication DTOs.

use edublog_core::domain::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response containing the issued token and the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// The public identity of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Full profile returned by `GET /api/auth/me`. Exactly one of
/// `professor` / `student` is present, matching the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor: Option<ProfessorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessorInfo {
    pub id: Uuid,
    pub bio: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentInfo {
    pub id: Uuid,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
}
