use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// The user-management REST surface.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/users/pending", get(handlers::list_pending))
        .route("/users/search", get(handlers::search_users))
        .route("/users/register", post(handlers::register_user))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/users/{id}/approve", post(handlers::approve_user))
        .route("/users/{id}/block", post(handlers::block_user))
        .layer(Extension(service))
}
