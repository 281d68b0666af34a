//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use edublog_core::domain::Role;
use edublog_core::ports::{PasswordService, TokenService};
use edublog_shared::dto::{
    LoginRequest, LoginResponse, ProfessorInfo, StudentInfo, UserProfileResponse, UserSummary,
};
use validator::Validate;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401 detail, so the
/// endpoint cannot be used to probe which emails exist.
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = token_service
        .generate_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(user_id = %user.id, "Login succeeded");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// GET /api/auth/me
///
/// Returns the account with its role profile attached; the other role's
/// field is absent from the response.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut profile = UserProfileResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        professor: None,
        student: None,
    };

    match user.role {
        Role::Professor => {
            profile.professor = state
                .professors
                .find_by_user_id(user.id)
                .await?
                .map(|p| ProfessorInfo {
                    id: p.id,
                    bio: p.bio,
                    subject: p.subject,
                });
        }
        Role::Student => {
            profile.student = state
                .students
                .find_by_user_id(user.id)
                .await?
                .map(|s| StudentInfo {
                    id: s.id,
                    enrollment: s.enrollment,
                    grade: s.grade,
                });
        }
    }

    Ok(HttpResponse::Ok().json(profile))
}
