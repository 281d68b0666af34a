//! # EduBlog Infrastructure
//!
//! Concrete implementations of the ports defined in `edublog-core`:
//! PostgreSQL repositories via SeaORM, JWT token issuing and Argon2
//! password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresPostRepository, PostgresProfessorRepository,
    PostgresStudentRepository, PostgresUserRepository,
};
