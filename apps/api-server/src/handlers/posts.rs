//! Post handlers: public read side, professor-only write side.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use edublog_core::domain::{Post, PostUpdate, Professor};
use edublog_shared::Paginated;
use edublog_shared::dto::{
    CreatePostRequest, MyPostItem, PageQuery, PostDetailResponse, PostListItem, PostListQuery,
    PostResponse, SearchQuery, UpdatePostRequest,
};

use crate::middleware::auth::ProfessorIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// The caller's professor profile. A professor-role token whose profile
/// row has been deleted gets a 403, not a panic on a missing row.
async fn current_professor(
    state: &AppState,
    identity: &ProfessorIdentity,
) -> Result<Professor, AppError> {
    state
        .professors
        .find_by_user_id(identity.0.user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("No professor profile for this account".to_string()))
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let page = state
        .posts
        .list_published(
            query.page_request(),
            query.order_by.into(),
            query.order.into(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(Paginated::<PostListItem>::from_page(page)))
}

/// GET /api/posts/search
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let page = state
        .posts
        .search_published(&query.q, query.page_request())
        .await?;

    Ok(HttpResponse::Ok().json(Paginated::<PostListItem>::from_page(page)))
}

/// GET /api/posts/{id}
pub async fn get_by_id(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let view = state
        .posts
        .find_detail(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PostDetailResponse::from(view)))
}

/// GET /api/posts/mine - the caller's own posts, drafts included.
pub async fn mine(
    state: web::Data<AppState>,
    identity: ProfessorIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let professor = current_professor(&state, &identity).await?;
    let page = state
        .posts
        .list_by_author(professor.id, query.page_request())
        .await?;

    Ok(HttpResponse::Ok().json(Paginated::<MyPostItem>::from_page(page)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: ProfessorIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let professor = current_professor(&state, &identity).await?;
    let post = Post::new(
        professor.id,
        req.title,
        req.description,
        req.content,
        req.published.unwrap_or(true),
    );
    let stored = state.posts.insert(&post).await?;

    tracing::info!(post_id = %stored.id, author_id = %professor.id, "Post created");

    Ok(HttpResponse::Created().json(PostResponse::from(stored)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: ProfessorIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let professor = current_professor(&state, &identity).await?;
    if post.author_id != professor.id {
        return Err(AppError::Forbidden(
            "You can only update your own posts".to_string(),
        ));
    }

    let changes = PostUpdate {
        title: req.title,
        description: req.description,
        content: req.content,
        published: req.published,
    };
    let stored = state.posts.update(id, &changes).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(stored)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: ProfessorIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let professor = current_professor(&state, &identity).await?;
    if post.author_id != professor.id {
        return Err(AppError::Forbidden(
            "You can only delete your own posts".to_string(),
        ));
    }

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
