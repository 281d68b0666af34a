//! Domain entities and the read models the repositories project into.

mod page;
mod post;
mod professor;
mod student;
mod user;

pub use page::{Page, PageRequest, SortOrder};
pub use post::{Post, PostDetailView, PostPreview, PostSort, PostTitle, PostUpdate};
pub use professor::{Professor, ProfessorProfile, ProfessorUpdate};
pub use student::{Student, StudentProfile, StudentUpdate};
pub use user::{Role, User};
