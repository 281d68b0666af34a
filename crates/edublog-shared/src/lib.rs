//! # EduBlog Shared
//!
//! Wire types shared between the API server and its clients: request and
//! response DTOs, query parameters and the error body. Everything here
//! serializes camelCase, matching what the mobile app consumes.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError, PageMeta, Paginated};
