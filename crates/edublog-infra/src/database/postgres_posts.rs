//! PostgreSQL post repository.
//!
//! The public read side joins the author chain (post -> professor -> user)
//! so listings carry the author's display name without extra round trips.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, FromQueryResult,
    JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use edublog_core::domain::{
    Page, PageRequest, Post, PostDetailView, PostPreview, PostSort, PostTitle, PostUpdate,
    SortOrder,
};
use edublog_core::error::RepoError;
use edublog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::{professor, user};
use super::map_db_err;

pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Listing projection: post columns plus the author's id and name.
    fn preview_select() -> Select<PostEntity> {
        PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .column(post::Column::Title)
            .column(post::Column::Description)
            .column(post::Column::CreatedAt)
            .column_as(professor::Column::Id, "author_id")
            .column_as(user::Column::Name, "author_name")
            .join(JoinType::InnerJoin, post::Relation::Professor.def())
            .join(JoinType::InnerJoin, professor::Relation::User.def())
    }
}

/// Escape LIKE wildcards so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Debug, FromQueryResult)]
struct PostPreviewRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    created_at: DateTimeWithTimeZone,
    author_id: Uuid,
    author_name: String,
}

impl From<PostPreviewRow> for PostPreview {
    fn from(row: PostPreviewRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at.into(),
            author_id: row.author_id,
            author_name: row.author_name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct PostDetailRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    content: String,
    published: bool,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    author_id: Uuid,
    author_name: String,
    author_bio: Option<String>,
}

impl From<PostDetailRow> for PostDetailView {
    fn from(row: PostDetailRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            published: row.published,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
            author_id: row.author_id,
            author_name: row.author_name,
            author_bio: row.author_bio,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct PostTitleRow {
    id: Uuid,
    title: String,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        page: PageRequest,
        sort: PostSort,
        order: SortOrder,
    ) -> Result<Page<PostPreview>, RepoError> {
        let sort_column = match sort {
            PostSort::CreatedAt => post::Column::CreatedAt,
            PostSort::Title => post::Column::Title,
        };
        let direction = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let paginator = Self::preview_select()
            .filter(post::Column::Published.eq(true))
            .order_by(sort_column, direction)
            .into_model::<PostPreviewRow>()
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

    async fn search_published(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError> {
        let pattern = format!("%{}%", escape_like(term));
        let matches = Condition::any()
            .add(Expr::col((post::Entity, post::Column::Title)).ilike(pattern.as_str()))
            .add(Expr::col((post::Entity, post::Column::Content)).ilike(pattern.as_str()))
            .add(Expr::col((post::Entity, post::Column::Description)).ilike(pattern.as_str()));

        let paginator = Self::preview_select()
            .filter(post::Column::Published.eq(true))
            .filter(matches)
            .order_by_desc(post::Column::CreatedAt)
            .into_model::<PostPreviewRow>()
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

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetailView>, RepoError> {
        let row = PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .column(post::Column::Title)
            .column(post::Column::Description)
            .column(post::Column::Content)
            .column(post::Column::Published)
            .column(post::Column::CreatedAt)
            .column(post::Column::UpdatedAt)
            .column_as(professor::Column::Id, "author_id")
            .column_as(user::Column::Name, "author_name")
            .column_as(professor::Column::Bio, "author_bio")
            .join(JoinType::InnerJoin, post::Relation::Professor.def())
            .join(JoinType::InnerJoin, professor::Relation::User.def())
            .filter(post::Column::Id.eq(id))
            .into_model::<PostDetailRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(page.page_index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn titles_by_author(&self, author_id: Uuid) -> Result<Vec<PostTitle>, RepoError> {
        let rows = PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .column(post::Column::Title)
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .into_model::<PostTitleRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| PostTitle {
                id: row.id,
                title: row.title,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn insert(&self, new_post: &Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post.clone())
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: &PostUpdate) -> Result<Post, RepoError> {
        let mut row = post::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(title) = &changes.title {
            row.title = Set(title.clone());
        }
        if let Some(description) = &changes.description {
            row.description = Set(Some(description.clone()));
        }
        if let Some(content) = &changes.content {
            row.content = Set(content.clone());
        }
        if let Some(published) = changes.published {
            row.published = Set(published);
        }
        row.updated_at = Set(Utc::now().into());

        let model = row.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
