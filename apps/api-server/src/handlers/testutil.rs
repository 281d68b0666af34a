//! In-memory fixtures for handler tests.
//!
//! `StubDb` implements every repository port over plain `Vec`s, with the
//! same join and cascade semantics the PostgreSQL repositories have, so
//! handlers can be invoked directly without a database.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use edublog_core::domain::{
    Page, PageRequest, Post, PostDetailView, PostPreview, PostSort, PostTitle, PostUpdate,
    Professor, ProfessorProfile, ProfessorUpdate, Role, SortOrder, Student, StudentProfile,
    StudentUpdate, User,
};
use edublog_core::error::RepoError;
use edublog_core::ports::{
    AuthError, PasswordService, PostRepository, ProfessorRepository, StudentRepository,
    TokenService, UserRepository,
};

use crate::middleware::auth::{Identity, ProfessorIdentity};
use crate::state::AppState;

/// Demo password shared by the fixtures.
pub const PASSWORD: &str = "123456";

#[derive(Default)]
pub struct StubDb {
    pub users: Mutex<Vec<User>>,
    pub professors: Mutex<Vec<Professor>>,
    pub students: Mutex<Vec<Student>>,
    pub posts: Mutex<Vec<Post>>,
}

/// Fresh stub-backed state plus a handle for seeding and inspection.
pub fn stub_state() -> (Arc<StubDb>, AppState) {
    let db = Arc::new(StubDb::default());
    let state = AppState {
        users: db.clone(),
        professors: db.clone(),
        students: db.clone(),
        posts: db.clone(),
        started_at: Instant::now(),
    };
    (db, state)
}

pub fn seed_professor(db: &StubDb, name: &str, email: &str) -> (User, Professor) {
    let user = User::new(
        email.to_string(),
        format!("plain:{PASSWORD}"),
        name.to_string(),
        Role::Professor,
    );
    let professor = Professor::new(user.id, Some(format!("{name} bio")), Some("Systems".into()));
    db.users.lock().unwrap().push(user.clone());
    db.professors.lock().unwrap().push(professor.clone());
    (user, professor)
}

pub fn seed_student(db: &StubDb, name: &str, email: &str) -> (User, Student) {
    let user = User::new(
        email.to_string(),
        format!("plain:{PASSWORD}"),
        name.to_string(),
        Role::Student,
    );
    let student = Student::new(user.id, Some("2026-001".into()), Some("Year 2".into()));
    db.users.lock().unwrap().push(user.clone());
    db.students.lock().unwrap().push(student.clone());
    (user, student)
}

pub fn seed_post(db: &StubDb, author: &Professor, title: &str, published: bool) -> Post {
    let post = Post::new(
        author.id,
        title.to_string(),
        Some(format!("Notes on {title}")),
        format!("{title} - long enough body text for the content rules to pass."),
        published,
    );
    db.posts.lock().unwrap().push(post.clone());
    post
}

pub fn identity(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role,
    }
}

pub fn professor_identity(user: &User) -> ProfessorIdentity {
    ProfessorIdentity(identity(user))
}

/// Token service that mints predictable tokens and never validates.
pub struct StubTokens;

impl TokenService for StubTokens {
    fn generate_token(&self, user_id: Uuid, _email: &str, _role: Role) -> Result<String, AuthError> {
        Ok(format!("token:{user_id}"))
    }

    fn validate_token(&self, _token: &str) -> Result<edublog_core::ports::TokenClaims, AuthError> {
        Err(AuthError::InvalidToken("stub".into()))
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

/// Password service that stores passwords as `plain:<password>`.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

pub fn token_data() -> web::Data<Arc<dyn TokenService>> {
    web::Data::new(Arc::new(StubTokens) as Arc<dyn TokenService>)
}

pub fn password_data() -> web::Data<Arc<dyn PasswordService>> {
    web::Data::new(Arc::new(PlainPasswords) as Arc<dyn PasswordService>)
}

pub async fn body_json(resp: actix_web::HttpResponse) -> serde_json::Value {
    let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let start = (page.page_index() * page.per_page) as usize;
    let slice: Vec<T> = items
        .iter()
        .skip(start)
        .take(page.per_page as usize)
        .cloned()
        .collect();
    Page::new(slice, page, total)
}

impl StubDb {
    fn professor_profile(&self, professor: &Professor) -> Option<ProfessorProfile> {
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| u.id == professor.user_id)?;
        let posts_count = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == professor.id)
            .count() as u64;
        Some(ProfessorProfile {
            id: professor.id,
            user_id: professor.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            bio: professor.bio.clone(),
            subject: professor.subject.clone(),
            posts_count,
            created_at: professor.created_at,
            updated_at: professor.updated_at,
        })
    }

    fn student_profile(&self, student: &Student) -> Option<StudentProfile> {
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| u.id == student.user_id)?;
        Some(StudentProfile {
            id: student.id,
            user_id: student.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            enrollment: student.enrollment.clone(),
            grade: student.grade.clone(),
            created_at: student.created_at,
            updated_at: student.updated_at,
        })
    }

    fn post_preview(&self, post: &Post) -> Option<PostPreview> {
        let professors = self.professors.lock().unwrap();
        let professor = professors.iter().find(|p| p.id == post.author_id)?;
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| u.id == professor.user_id)?;
        Some(PostPreview {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            created_at: post.created_at,
            author_id: post.author_id,
            author_name: user.name.clone(),
        })
    }

    fn post_detail(&self, post: &Post) -> Option<PostDetailView> {
        let professors = self.professors.lock().unwrap();
        let professor = professors.iter().find(|p| p.id == post.author_id)?;
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| u.id == professor.user_id)?;
        Some(PostDetailView {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author_id: post.author_id,
            author_name: user.name.clone(),
            author_bio: professor.bio.clone(),
        })
    }
}

#[async_trait]
impl UserRepository for StubDb {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        drop(users);
        // FK cascade takes the profile rows with the user
        self.professors.lock().unwrap().retain(|p| p.user_id != id);
        self.students.lock().unwrap().retain(|s| s.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfessorRepository for StubDb {
    async fn list(&self, page: PageRequest) -> Result<Page<ProfessorProfile>, RepoError> {
        let professors = self.professors.lock().unwrap().clone();
        let mut profiles: Vec<ProfessorProfile> = professors
            .iter()
            .filter_map(|p| self.professor_profile(p))
            .collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&profiles, page))
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<ProfessorProfile>, RepoError> {
        let professor = self
            .professors
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        Ok(professor.and_then(|p| self.professor_profile(&p)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professor>, RepoError> {
        Ok(self
            .professors
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Professor>, RepoError> {
        Ok(self
            .professors
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn insert_with_user(
        &self,
        user: &User,
        professor: &Professor,
    ) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("duplicate email".into()));
        }
        users.push(user.clone());
        drop(users);
        self.professors.lock().unwrap().push(professor.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ProfessorUpdate) -> Result<(), RepoError> {
        let user_id;
        {
            let mut professors = self.professors.lock().unwrap();
            let professor = professors
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            if let Some(bio) = &changes.bio {
                professor.bio = Some(bio.clone());
            }
            if let Some(subject) = &changes.subject {
                professor.subject = Some(subject.clone());
            }
            professor.updated_at = Utc::now();
            user_id = professor.user_id;
        }
        if let Some(name) = &changes.name {
            if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == user_id) {
                user.name = name.clone();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for StubDb {
    async fn list(&self, page: PageRequest) -> Result<Page<StudentProfile>, RepoError> {
        let students = self.students.lock().unwrap().clone();
        let mut profiles: Vec<StudentProfile> = students
            .iter()
            .filter_map(|s| self.student_profile(s))
            .collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&profiles, page))
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<StudentProfile>, RepoError> {
        let student = self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned();
        Ok(student.and_then(|s| self.student_profile(&s)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepoError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, RepoError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn insert_with_user(&self, user: &User, student: &Student) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("duplicate email".into()));
        }
        users.push(user.clone());
        drop(users);
        self.students.lock().unwrap().push(student.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &StudentUpdate) -> Result<(), RepoError> {
        let user_id;
        {
            let mut students = self.students.lock().unwrap();
            let student = students
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(RepoError::NotFound)?;
            if let Some(enrollment) = &changes.enrollment {
                student.enrollment = Some(enrollment.clone());
            }
            if let Some(grade) = &changes.grade {
                student.grade = Some(grade.clone());
            }
            student.updated_at = Utc::now();
            user_id = student.user_id;
        }
        if let Some(name) = &changes.name {
            if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == user_id) {
                user.name = name.clone();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for StubDb {
    async fn list_published(
        &self,
        page: PageRequest,
        sort: PostSort,
        order: SortOrder,
    ) -> Result<Page<PostPreview>, RepoError> {
        let posts = self.posts.lock().unwrap().clone();
        let mut previews: Vec<PostPreview> = posts
            .iter()
            .filter(|p| p.published)
            .filter_map(|p| self.post_preview(p))
            .collect();
        previews.sort_by(|a, b| match sort {
            PostSort::CreatedAt => a.created_at.cmp(&b.created_at),
            PostSort::Title => a.title.cmp(&b.title),
        });
        if order == SortOrder::Desc {
            previews.reverse();
        }
        Ok(paginate(&previews, page))
    }

    async fn search_published(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError> {
        let needle = term.to_lowercase();
        let posts = self.posts.lock().unwrap().clone();
        let mut previews: Vec<PostPreview> = posts
            .iter()
            .filter(|p| p.published)
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .filter_map(|p| self.post_preview(p))
            .collect();
        previews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&previews, page))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetailView>, RepoError> {
        let post = self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned();
        Ok(post.and_then(|p| self.post_detail(&p)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&posts, page))
    }

    async fn titles_by_author(&self, author_id: Uuid) -> Result<Vec<PostTitle>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .map(|p| PostTitle {
                id: p.id,
                title: p.title,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .count() as u64)
    }

    async fn insert(&self, post: &Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(post.clone())
    }

    async fn update(&self, id: Uuid, changes: &PostUpdate) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(title) = &changes.title {
            post.title = title.clone();
        }
        if let Some(description) = &changes.description {
            post.description = Some(description.clone());
        }
        if let Some(content) = &changes.content {
            post.content = content.clone();
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
