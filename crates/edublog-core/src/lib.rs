//! # EduBlog Core
//!
//! The domain layer of the EduBlog platform.
//! This crate contains pure business types and ports with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
