use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student profile, one-to-one with a [`super::User`] of role `STUDENT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn new(user_id: Uuid, enrollment: Option<String>, grade: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            enrollment,
            grade,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
}

/// Student joined with its user row.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
