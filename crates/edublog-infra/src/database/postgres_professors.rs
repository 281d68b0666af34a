//! PostgreSQL professor repository.
//!
//! Profile reads join the `users` row and aggregate the owned-post count,
//! the projection every listing and detail screen renders.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, TransactionTrait,
};
use uuid::Uuid;

use edublog_core::domain::{Page, PageRequest, Professor, ProfessorProfile, ProfessorUpdate, User};
use edublog_core::error::RepoError;
use edublog_core::ports::ProfessorRepository;

use super::entity::professor::{self, Entity as ProfessorEntity};
use super::entity::{post, user};
use super::map_db_err;

pub struct PostgresProfessorRepository {
    db: DbConn,
}

impl PostgresProfessorRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Professors joined with their user row, posts counted per professor.
    fn profile_select() -> Select<ProfessorEntity> {
        ProfessorEntity::find()
            .select_only()
            .column(professor::Column::Id)
            .column(professor::Column::UserId)
            .column_as(user::Column::Name, "name")
            .column_as(user::Column::Email, "email")
            .column(professor::Column::Bio)
            .column(professor::Column::Subject)
            .column_as(post::Column::Id.count(), "posts_count")
            .column(professor::Column::CreatedAt)
            .column(professor::Column::UpdatedAt)
            .join(JoinType::InnerJoin, professor::Relation::User.def())
            .join(JoinType::LeftJoin, professor::Relation::Posts.def())
            .group_by(professor::Column::Id)
            .group_by(user::Column::Id)
    }
}

#[derive(Debug, FromQueryResult)]
struct ProfessorProfileRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    email: String,
    bio: Option<String>,
    subject: Option<String>,
    posts_count: i64,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

impl From<ProfessorProfileRow> for ProfessorProfile {
    fn from(row: ProfessorProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            bio: row.bio,
            subject: row.subject,
            posts_count: row.posts_count as u64,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

#[async_trait]
impl ProfessorRepository for PostgresProfessorRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<ProfessorProfile>, RepoError> {
        let paginator = Self::profile_select()
            .order_by_desc(professor::Column::CreatedAt)
            .into_model::<ProfessorProfileRow>()
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(page.page_index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<ProfessorProfile>, RepoError> {
        let row = Self::profile_select()
            .filter(professor::Column::Id.eq(id))
            .into_model::<ProfessorProfileRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professor>, RepoError> {
        let result = ProfessorEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Professor>, RepoError> {
        let result = ProfessorEntity::find()
            .filter(professor::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert_with_user(
        &self,
        account: &User,
        professor_row: &Professor,
    ) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        user::ActiveModel::from(account.clone())
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        professor::ActiveModel::from(professor_row.clone())
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ProfessorUpdate) -> Result<(), RepoError> {
        let existing = ProfessorEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut prof = professor::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(bio) = &changes.bio {
            prof.bio = Set(Some(bio.clone()));
        }
        if let Some(subject) = &changes.subject {
            prof.subject = Set(Some(subject.clone()));
        }
        prof.updated_at = Set(now.into());
        prof.update(&txn).await.map_err(map_db_err)?;

        // A name change lands on the user row, in the same transaction.
        if let Some(name) = &changes.name {
            let account = user::ActiveModel {
                id: Unchanged(existing.user_id),
                name: Set(name.clone()),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            account.update(&txn).await.map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
