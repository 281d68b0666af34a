//! PostgreSQL student repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, TransactionTrait,
};
use uuid::Uuid;

use edublog_core::domain::{Page, PageRequest, Student, StudentProfile, StudentUpdate, User};
use edublog_core::error::RepoError;
use edublog_core::ports::StudentRepository;

use super::entity::student::{self, Entity as StudentEntity};
use super::entity::user;
use super::map_db_err;

pub struct PostgresStudentRepository {
    db: DbConn,
}

impl PostgresStudentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Students joined with their user row.
    fn profile_select() -> Select<StudentEntity> {
        StudentEntity::find()
            .select_only()
            .column(student::Column::Id)
            .column(student::Column::UserId)
            .column_as(user::Column::Name, "name")
            .column_as(user::Column::Email, "email")
            .column(student::Column::Enrollment)
            .column(student::Column::Grade)
            .column(student::Column::CreatedAt)
            .column(student::Column::UpdatedAt)
            .join(JoinType::InnerJoin, student::Relation::User.def())
    }
}

#[derive(Debug, FromQueryResult)]
struct StudentProfileRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    email: String,
    enrollment: Option<String>,
    grade: Option<String>,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

impl From<StudentProfileRow> for StudentProfile {
    fn from(row: StudentProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            enrollment: row.enrollment,
            grade: row.grade,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<StudentProfile>, RepoError> {
        let paginator = Self::profile_select()
            .order_by_desc(student::Column::CreatedAt)
            .into_model::<StudentProfileRow>()
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

    async fn find_profile(&self, id: Uuid) -> Result<Option<StudentProfile>, RepoError> {
        let row = Self::profile_select()
            .filter(student::Column::Id.eq(id))
            .into_model::<StudentProfileRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepoError> {
        let result = StudentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, RepoError> {
        let result = StudentEntity::find()
            .filter(student::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert_with_user(&self, account: &User, student_row: &Student) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        user::ActiveModel::from(account.clone())
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        student::ActiveModel::from(student_row.clone())
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &StudentUpdate) -> Result<(), RepoError> {
        let existing = StudentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut row = student::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(enrollment) = &changes.enrollment {
            row.enrollment = Set(Some(enrollment.clone()));
        }
        if let Some(grade) = &changes.grade {
            row.grade = Set(Some(grade.clone()));
        }
        row.updated_at = Set(now.into());
        row.update(&txn).await.map_err(map_db_err)?;

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
