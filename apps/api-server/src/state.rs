//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use edublog_core::ports::{
    PostRepository, ProfessorRepository, StudentRepository, UserRepository,
};
use edublog_infra::database::DbConn;
use edublog_infra::{
    PostgresPostRepository, PostgresProfessorRepository, PostgresStudentRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub professors: Arc<dyn ProfessorRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub started_at: Instant,
}

impl AppState {
    /// Wire every repository onto one connection pool.
    pub fn new(db: DbConn) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            professors: Arc::new(PostgresProfessorRepository::new(db.clone())),
            students: Arc::new(PostgresStudentRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db)),
            started_at: Instant::now(),
        }
    }
}
