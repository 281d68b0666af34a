use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Professor profile, one-to-one with a [`super::User`] of role `PROFESSOR`.
/// Posts reference the professor id, not the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Professor {
    /// Create a new profile for an existing or about-to-be-inserted user.
    pub fn new(user_id: Uuid, bio: Option<String>, subject: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            bio,
            subject,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfessorUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub subject: Option<String>,
}

/// Professor joined with its user row, plus the owned-post count
/// the listings display.
#[derive(Debug, Clone)]
pub struct ProfessorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub subject: Option<String>,
    pub posts_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
