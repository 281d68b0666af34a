//! Database connection management and PostgreSQL repositories.

mod connections;

pub mod entity;
mod postgres_posts;
mod postgres_professors;
mod postgres_students;
mod postgres_users;

pub use connections::DatabaseConfig;
pub use postgres_posts::PostgresPostRepository;
pub use postgres_professors::PostgresProfessorRepository;
pub use postgres_students::PostgresStudentRepository;
pub use postgres_users::PostgresUserRepository;
pub use sea_orm::DbConn;

use edublog_core::error::RepoError;
use sea_orm::{DbErr, SqlErr};

/// Translate a SeaORM error into the repository error the domain sees.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => RepoError::Query(err.to_string()),
    }
}

#[cfg(test)]
mod tests;
