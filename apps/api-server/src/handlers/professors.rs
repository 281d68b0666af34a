//! Professor management handlers. Every route is professor-only.

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use edublog_core::domain::{Professor, ProfessorUpdate, Role, User};
use edublog_core::ports::PasswordService;
use edublog_shared::Paginated;
use edublog_shared::dto::{
    CreateProfessorRequest, PageQuery, ProfessorDetailResponse, ProfessorListItem,
    ProfessorResponse, UpdateProfessorRequest,
};

use crate::middleware::auth::ProfessorIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/professors
pub async fn list(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let page = state.professors.list(query.page_request()).await?;

    Ok(HttpResponse::Ok().json(Paginated::<ProfessorListItem>::from_page(page)))
}

/// GET /api/professors/{id} - profile plus the titles of every post.
pub async fn get_by_id(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let profile = state
        .professors
        .find_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professor not found".to_string()))?;
    let posts = state.posts.titles_by_author(id).await?;

    Ok(HttpResponse::Ok().json(ProfessorDetailResponse::new(profile, posts)))
}

/// POST /api/professors - creates the login account and the profile
/// in one transaction.
pub async fn create(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    _identity: ProfessorIdentity,
    body: web::Json<CreateProfessorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.email, password_hash, req.name, Role::Professor);
    let professor = Professor::new(user.id, req.bio, req.subject);
    state.professors.insert_with_user(&user, &professor).await?;

    tracing::info!(professor_id = %professor.id, "Professor created");

    Ok(HttpResponse::Created().json(ProfessorResponse {
        id: professor.id,
        name: user.name,
        email: user.email,
        bio: professor.bio,
        subject: professor.subject,
        created_at: professor.created_at,
        updated_at: professor.updated_at,
    }))
}

/// PUT /api/professors/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: ProfessorIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfessorRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    state
        .professors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professor not found".to_string()))?;

    let changes = ProfessorUpdate {
        name: req.name,
        bio: req.bio,
        subject: req.subject,
    };
    state.professors.update(id, &changes).await?;

    let profile = state
        .professors
        .find_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professor not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfessorResponse::from(profile)))
}

/// DELETE /api/professors/{id}
///
/// Guards: a professor cannot delete their own account, and a professor
/// who still owns posts cannot be removed.
pub async fn delete(
    state: web::Data<AppState>,
    identity: ProfessorIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let professor = state
        .professors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professor not found".to_string()))?;

    if professor.user_id == identity.0.user_id {
        return Err(AppError::BadRequest("You cannot delete yourself".to_string()));
    }

    let owned = state.posts.count_by_author(professor.id).await?;
    if owned > 0 {
        return Err(AppError::Conflict(format!(
            "Professor has {owned} associated posts. Delete them first."
        )));
    }

    // Deleting the user cascades to the profile row
    state.users.delete(professor.user_id).await?;

    tracing::info!(professor_id = %id, "Professor deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testutil::{
        self, body_json, professor_identity, seed_post, seed_professor, stub_state,
    };
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    fn create_body(name: &str, email: &str) -> web::Json<CreateProfessorRequest> {
        web::Json(CreateProfessorRequest {
            name: name.into(),
            email: email.into(),
            password: "secret1".into(),
            bio: Some("Writes about compilers".into()),
            subject: Some("Compilers".into()),
        })
    }

    #[actix_web::test]
    async fn list_includes_posts_count() {
        let (db, state) = stub_state();
        let (user, professor) = seed_professor(&db, "Ada Lovelace", "ada@example.com");
        seed_post(&db, &professor, "Engines", true);
        seed_post(&db, &professor, "Drafts", false);

        let resp = list(
            web::Data::new(state),
            professor_identity(&user),
            web::Query(PageQuery::default()),
        )
        .await
        .unwrap();

        let body = body_json(resp).await;
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["postsCount"], 2);
        assert_eq!(body["data"][0]["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn create_persists_account_and_profile() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let resp = create(
            web::Data::new(state),
            testutil::password_data(),
            professor_identity(&caller),
            create_body("Grace Hopper", "grace@example.com"),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["name"], "Grace Hopper");
        assert!(body.get("password").is_none());

        let users = db.users.lock().unwrap();
        let stored = users.iter().find(|u| u.email == "grace@example.com").unwrap();
        assert_eq!(stored.role, Role::Professor);
        assert_eq!(stored.password_hash, "plain:secret1");
        assert_eq!(db.professors.lock().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn create_with_taken_email_conflicts() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let err = create(
            web::Data::new(state),
            testutil::password_data(),
            professor_identity(&caller),
            create_body("Impostor", "ada@example.com"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn create_rejects_short_password() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let mut body = create_body("Grace Hopper", "grace@example.com").into_inner();
        body.password = "12345".into();
        let err = create(
            web::Data::new(state),
            testutil::password_data(),
            professor_identity(&caller),
            web::Json(body),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn detail_lists_every_post_title() {
        let (db, state) = stub_state();
        let (user, professor) = seed_professor(&db, "Ada Lovelace", "ada@example.com");
        seed_post(&db, &professor, "Published", true);
        seed_post(&db, &professor, "Draft", false);

        let resp = get_by_id(
            web::Data::new(state),
            professor_identity(&user),
            web::Path::from(professor.id),
        )
        .await
        .unwrap();

        let body = body_json(resp).await;
        let titles: Vec<&str> = body["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        // Drafts included, newest first
        assert_eq!(titles, vec!["Draft", "Published"]);
    }

    #[actix_web::test]
    async fn update_changes_the_user_name_too() {
        let (db, state) = stub_state();
        let (caller, professor) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let req = UpdateProfessorRequest {
            name: Some("Ada King".into()),
            ..Default::default()
        };
        let resp = update(
            web::Data::new(state),
            professor_identity(&caller),
            web::Path::from(professor.id),
            web::Json(req),
        )
        .await
        .unwrap();

        let body = body_json(resp).await;
        assert_eq!(body["name"], "Ada King");
        assert_eq!(db.users.lock().unwrap()[0].name, "Ada King");
        // Untouched profile fields survive
        assert_eq!(body["subject"], "Systems");
    }

    #[actix_web::test]
    async fn delete_of_own_account_is_rejected() {
        let (db, state) = stub_state();
        let (caller, professor) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let err = delete(
            web::Data::new(state),
            professor_identity(&caller),
            web::Path::from(professor.id),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(db.users.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn delete_with_owned_posts_conflicts() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");
        let (_, target) = seed_professor(&db, "Grace Hopper", "grace@example.com");
        seed_post(&db, &target, "Compilers", true);

        let err = delete(
            web::Data::new(state),
            professor_identity(&caller),
            web::Path::from(target.id),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(db.users.lock().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn delete_cascades_to_the_profile_row() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");
        let (_, target) = seed_professor(&db, "Grace Hopper", "grace@example.com");

        let resp = delete(
            web::Data::new(state),
            professor_identity(&caller),
            web::Path::from(target.id),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(db.users.lock().unwrap().len(), 1);
        assert_eq!(db.professors.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn delete_of_missing_professor_is_not_found() {
        let (db, state) = stub_state();
        let (caller, _) = seed_professor(&db, "Ada Lovelace", "ada@example.com");

        let err = delete(
            web::Data::new(state),
            professor_identity(&caller),
            web::Path::from(Uuid::new_v4()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
