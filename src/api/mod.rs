// src/api/mod.rs
//! Thin HTTP surface over [`DirectoryService`].
//!
//! Handlers only read a store snapshot and shape the response; scraping,
//! searching and encoding all live in the library.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::error::ExportError;
use crate::service::DirectoryService;

pub mod handlers;
pub mod router;

pub use router::build_router;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Query parameter 'q' is required")]
    MissingQuery,

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingQuery | ApiError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::Export(e) => {
                error!("{e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, service: Arc<DirectoryService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
