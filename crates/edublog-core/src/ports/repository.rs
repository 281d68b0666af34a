use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Page, PageRequest, Post, PostDetailView, PostPreview, PostSort, PostTitle, PostUpdate,
    Professor, ProfessorProfile, ProfessorUpdate, SortOrder, Student, StudentProfile,
    StudentUpdate, User,
};
use crate::error::RepoError;

/// User lookups and account removal. User rows are inserted through the
/// profile repositories so the account and its role profile land in one
/// transaction.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Delete a user. The role profile row goes with it (FK cascade).
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Professor profiles, always read together with their user row.
#[async_trait]
pub trait ProfessorRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<ProfessorProfile>, RepoError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<ProfessorProfile>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professor>, RepoError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Professor>, RepoError>;

    /// Insert the base user and the professor profile atomically.
    async fn insert_with_user(&self, user: &User, professor: &Professor)
    -> Result<(), RepoError>;

    /// Apply a partial update; `None` fields keep their stored value.
    /// A `name` change touches the user row in the same transaction.
    async fn update(&self, id: Uuid, changes: &ProfessorUpdate) -> Result<(), RepoError>;
}

/// Student profiles, always read together with their user row.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<StudentProfile>, RepoError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<StudentProfile>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepoError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, RepoError>;

    /// Insert the base user and the student profile atomically.
    async fn insert_with_user(&self, user: &User, student: &Student) -> Result<(), RepoError>;

    /// Apply a partial update; `None` fields keep their stored value.
    async fn update(&self, id: Uuid, changes: &StudentUpdate) -> Result<(), RepoError>;
}

/// Posts, including the joined projections the read side serves.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Published posts with their author names, paginated and sorted.
    async fn list_published(
        &self,
        page: PageRequest,
        sort: PostSort,
        order: SortOrder,
    ) -> Result<Page<PostPreview>, RepoError>;

    /// Case-insensitive substring search over title, content and
    /// description of published posts, newest first.
    async fn search_published(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError>;

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetailView>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts of one author (drafts included), newest first.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// Id/title pairs of one author's posts, newest first.
    async fn titles_by_author(&self, author_id: Uuid) -> Result<Vec<PostTitle>, RepoError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;

    async fn insert(&self, post: &Post) -> Result<Post, RepoError>;

    /// Apply a partial update and return the stored post.
    async fn update(&self, id: Uuid, changes: &PostUpdate) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
