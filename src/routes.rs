// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{enrollment, exam_session, status},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (exam sessions, enrollment, statuses).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let exam_session_routes = Router::new()
        .route("/", get(exam_session::list).post(exam_session::store))
        .route("/create", get(exam_session::create_form))
        .route(
            "/{id}",
            get(exam_session::show)
                .put(exam_session::update)
                .delete(exam_session::destroy),
        )
        .route("/{id}/edit", get(exam_session::edit_form))
        .route("/{id}/generate-token", post(exam_session::generate_token))
        .route("/{id}/enrollment/create", get(enrollment::create_form))
        .route("/{id}/enrollment", post(enrollment::store))
        .route("/{id}/enrollment/{group_id}", delete(enrollment::destroy));

    let exam_status_routes = Router::new().route("/", put(status::update_status));

    Router::new()
        .nest("/api/exam-sessions", exam_session_routes)
        .nest("/api/exam-statuses", exam_status_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
