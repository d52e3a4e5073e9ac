// src/api/router.rs

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::service::DirectoryService;

pub fn build_router(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/members", get(handlers::list_members))
        .route("/members/search", get(handlers::search_members))
        .route("/members/export/:format", get(handlers::export_members))
        .route("/members/refresh", post(handlers::refresh))
        .with_state(service)
}
