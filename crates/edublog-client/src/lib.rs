//! # EduBlog Client
//!
//! Typed HTTP client for the EduBlog API, the layer the mobile shell
//! embeds. Every server endpoint is exposed as a method returning the
//! shared wire types. The client holds the bearer token: `login` stores
//! it, any 401 response drops it so the caller can re-authenticate.

mod error;

pub use error::ClientError;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use edublog_shared::dto::{
    CreatePostRequest, CreateProfessorRequest, CreateStudentRequest, LoginRequest, LoginResponse,
    MyPostItem, PageQuery, PostDetailResponse, PostListItem, PostListQuery, PostResponse,
    ProfessorDetailResponse, ProfessorListItem, ProfessorResponse, SearchQuery, StudentListItem,
    StudentResponse, UpdatePostRequest, UpdateProfessorRequest, UpdateStudentRequest,
    UserProfileResponse,
};
use edublog_shared::{ErrorResponse, Paginated};

/// Total per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Server liveness summary from `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Client for the EduBlog REST API.
///
/// Cheap to share behind an `Arc`; the underlying connection pool and the
/// token store are both safe to use from multiple tasks.
pub struct BlogClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl BlogClient {
    /// Build a client against `base_url` (scheme, host and port, no
    /// trailing path). A trailing slash is tolerated and trimmed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Store a bearer token for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Forget the stored token.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The currently stored token, if any.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ==================== Auth ====================

    /// `POST /api/auth/login`. Stores the issued token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let login: LoginResponse = self
            .send_json(self.request(Method::POST, "/api/auth/login").json(&body))
            .await?;
        self.set_token(login.token.clone());
        Ok(login)
    }

    /// `GET /api/auth/me`.
    pub async fn me(&self) -> Result<UserProfileResponse, ClientError> {
        self.send_json(self.request(Method::GET, "/api/auth/me"))
            .await
    }

    // ==================== Posts ====================

    /// `GET /api/posts`.
    pub async fn list_posts(
        &self,
        query: &PostListQuery,
    ) -> Result<Paginated<PostListItem>, ClientError> {
        self.send_json(self.request(Method::GET, "/api/posts").query(query))
            .await
    }

    /// `GET /api/posts/search`.
    pub async fn search_posts(
        &self,
        query: &SearchQuery,
    ) -> Result<Paginated<PostListItem>, ClientError> {
        self.send_json(self.request(Method::GET, "/api/posts/search").query(query))
            .await
    }

    /// `GET /api/posts/{id}`.
    pub async fn get_post(&self, id: Uuid) -> Result<PostDetailResponse, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/api/posts/{id}")))
            .await
    }

    /// `GET /api/posts/mine`. Requires a professor token.
    pub async fn my_posts(&self, query: &PageQuery) -> Result<Paginated<MyPostItem>, ClientError> {
        self.send_json(self.request(Method::GET, "/api/posts/mine").query(query))
            .await
    }

    /// `POST /api/posts`. Requires a professor token.
    pub async fn create_post(&self, body: &CreatePostRequest) -> Result<PostResponse, ClientError> {
        self.send_json(self.request(Method::POST, "/api/posts").json(body))
            .await
    }

    /// `PUT /api/posts/{id}`. Requires the authoring professor's token.
    pub async fn update_post(
        &self,
        id: Uuid,
        body: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/posts/{id}"))
                .json(body),
        )
        .await
    }

    /// `DELETE /api/posts/{id}`. Requires the authoring professor's token.
    pub async fn delete_post(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/posts/{id}")))
            .await
    }

    // ==================== Professors ====================

    /// `GET /api/professors`. Requires a professor token.
    pub async fn list_professors(
        &self,
        query: &PageQuery,
    ) -> Result<Paginated<ProfessorListItem>, ClientError> {
        self.send_json(self.request(Method::GET, "/api/professors").query(query))
            .await
    }

    /// `GET /api/professors/{id}`. Requires a professor token.
    pub async fn get_professor(&self, id: Uuid) -> Result<ProfessorDetailResponse, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/api/professors/{id}")))
            .await
    }

    /// `POST /api/professors`. Requires a professor token.
    pub async fn create_professor(
        &self,
        body: &CreateProfessorRequest,
    ) -> Result<ProfessorResponse, ClientError> {
        self.send_json(self.request(Method::POST, "/api/professors").json(body))
            .await
    }

    /// `PUT /api/professors/{id}`. Requires a professor token.
    pub async fn update_professor(
        &self,
        id: Uuid,
        body: &UpdateProfessorRequest,
    ) -> Result<ProfessorResponse, ClientError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/professors/{id}"))
                .json(body),
        )
        .await
    }

    /// `DELETE /api/professors/{id}`. Requires a professor token.
    pub async fn delete_professor(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/professors/{id}")))
            .await
    }

    // ==================== Students ====================

    /// `GET /api/students`. Requires a professor token.
    pub async fn list_students(
        &self,
        query: &PageQuery,
    ) -> Result<Paginated<StudentListItem>, ClientError> {
        self.send_json(self.request(Method::GET, "/api/students").query(query))
            .await
    }

    /// `GET /api/students/{id}`. Requires a professor token.
    pub async fn get_student(&self, id: Uuid) -> Result<StudentResponse, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/api/students/{id}")))
            .await
    }

    /// `POST /api/students`. Requires a professor token.
    pub async fn create_student(
        &self,
        body: &CreateStudentRequest,
    ) -> Result<StudentResponse, ClientError> {
        self.send_json(self.request(Method::POST, "/api/students").json(body))
            .await
    }

    /// `PUT /api/students/{id}`. Requires a professor token.
    pub async fn update_student(
        &self,
        id: Uuid,
        body: &UpdateStudentRequest,
    ) -> Result<StudentResponse, ClientError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/students/{id}"))
                .json(body),
        )
        .await
    }

    /// `DELETE /api/students/{id}`. Requires a professor token.
    pub async fn delete_student(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/students/{id}")))
            .await
    }

    // ==================== Misc ====================

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send_json(self.request(Method::GET, "/api/health"))
            .await
    }

    // ==================== Plumbing ====================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the stored bearer token if there is one.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        let response = builder.send().await?;
        self.check(response).await?;
        Ok(())
    }

    /// Pass 2xx responses through; turn anything else into
    /// [`ClientError::Api`]. A 401 also drops the stored token, since the
    /// server no longer accepts it.
    async fn check(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.clear_token();
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(problem) => problem_message(problem),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// The most specific human-readable text a problem body carries.
fn problem_message(problem: ErrorResponse) -> String {
    match problem.detail {
        Some(detail) => detail,
        None => problem.title,
    }
}
