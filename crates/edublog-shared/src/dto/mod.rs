//! Data Transfer Objects - request/response types for the API.

mod auth;
mod post;
mod professor;
mod query;
mod student;
pub mod validation;

pub use auth::{
    LoginRequest, LoginResponse, ProfessorInfo, StudentInfo, UserProfileResponse, UserSummary,
};
pub use post::{
    CreatePostRequest, MyPostItem, PostAuthor, PostDetailAuthor, PostDetailResponse, PostListItem,
    PostResponse, PostTitleItem, UpdatePostRequest,
};
pub use professor::{
    CreateProfessorRequest, ProfessorDetailResponse, ProfessorListItem, ProfessorResponse,
    UpdateProfessorRequest,
};
pub use query::{PageQuery, PostListQuery, PostSortField, SearchQuery, SortDirection};
pub use student::{CreateStudentRequest, StudentListItem, StudentResponse, UpdateStudentRequest};
