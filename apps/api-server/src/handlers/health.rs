//! Health check and welcome endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub uptime_secs: u64,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(response)
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: EndpointGroups,
}

#[derive(Serialize)]
pub struct EndpointGroups {
    pub health: &'static str,
    pub auth: &'static str,
    pub posts: &'static str,
    pub professors: &'static str,
    pub students: &'static str,
}

/// GET /api - welcome document listing the endpoint groups.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(IndexResponse {
        message: "Welcome to the EduBlog API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointGroups {
            health: "GET /api/health",
            auth: "/api/auth",
            posts: "/api/posts",
            professors: "/api/professors",
            students: "/api/students",
        },
    })
}
