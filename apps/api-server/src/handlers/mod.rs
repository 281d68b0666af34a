//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod professors;
mod students;

#[cfg(test)]
pub mod testutil;

use actix_web::web;

/// Configure all application routes.
///
/// Fixed segments (`/search`, `/mine`) are registered before the `{id}`
/// matcher so they are not swallowed by it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Service surface
            .route("", web::get().to(health::index))
            .route("/", web::get().to(health::index))
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts: public read side, professor-only write side
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/search", web::get().to(posts::search))
                    .route("/mine", web::get().to(posts::mine))
                    .route("/{id}", web::get().to(posts::get_by_id))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            // Professors: professor-only
            .service(
                web::scope("/professors")
                    .route("", web::get().to(professors::list))
                    .route("", web::post().to(professors::create))
                    .route("/{id}", web::get().to(professors::get_by_id))
                    .route("/{id}", web::put().to(professors::update))
                    .route("/{id}", web::delete().to(professors::delete)),
            )
            // Students: professor-only
            .service(
                web::scope("/students")
                    .route("", web::get().to(students::list))
                    .route("", web::post().to(students::create))
                    .route("/{id}", web::get().to(students::get_by_id))
                    .route("/{id}", web::put().to(students::update))
                    .route("/{id}", web::delete().to(students::delete)),
            ),
    );
}
