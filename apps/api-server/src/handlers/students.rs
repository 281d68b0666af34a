//! Student management handlers. Every route is professor-only.

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use edublog_core::domain::{Role, Student, StudentUpdate, User};
use edublog_core::ports::PasswordService;
use edublog_shared::Paginated;
use edublog_shared::dto::{
    CreateStudentRequest, PageQuery, StudentListItem, StudentResponse, UpdateStudentRequest,
};

use crate::middleware::auth::ProfessorIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/students
pub async fn list(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let page = state.students.list(query.page_request()).await?;

    Ok(HttpResponse::Ok().json(Paginated::<StudentListItem>::from_page(page)))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let profile = state
        .students
        .find_profile(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(HttpResponse::Ok().json(StudentResponse::from(profile)))
}

/// POST /api/students - creates the login account and the profile
/// in one transaction.
pub async fn create(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    _identity: ProfessorIdentity,
    body: web::Json<CreateStudentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.email, password_hash, req.name, Role::Student);
    let student = Student::new(user.id, req.enrollment, req.grade);
    state.students.insert_with_user(&user, &student).await?;

    tracing::info!(student_id = %student.id, "Student created");

    Ok(HttpResponse::Created().json(StudentResponse {
        id: student.id,
        name: user.name,
        email: user.email,
        enrollment: student.enrollment,
        grade: student.grade,
        created_at: student.created_at,
        updated_at: student.updated_at,
    }))
}

/// PUT /api/students/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStudentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let changes = StudentUpdate {
        name: req.name,
        enrollment: req.enrollment,
        grade: req.grade,
    };
    state.students.update(id, &changes).await?;

    let profile = state
        .students
        .find_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(HttpResponse::Ok().json(StudentResponse::from(profile)))
}

/// DELETE /api/students/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    // Deleting the user cascades to the profile row
    state.users.delete(student.user_id).await?;

    tracing::info!(student_id = %id, "Student deleted");

    Ok(HttpResponse::NoContent().finish())
}
