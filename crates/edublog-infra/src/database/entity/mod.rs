//! SeaORM entities mirroring the relational schema.

pub mod post;
pub mod professor;
pub mod student;
pub mod user;
