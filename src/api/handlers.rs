// src/api/handlers.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::ApiError;
use crate::config::{ExportFormat, consts::{DEFAULT_FILE, SERVICE_NAME}};
use crate::file::to_export_bytes;
use crate::member::MemberView;
use crate::service::DirectoryService;

type Svc = State<Arc<DirectoryService>>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusBody {
    pub service: String,
    pub version: String,
    pub loaded: bool,
    pub total_members: usize,
}

/// Never triggers a scrape.
pub async fn status(State(svc): Svc) -> Json<StatusBody> {
    let count = svc.loaded_count().await;
    Json(StatusBody {
        service: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        loaded: count.is_some(),
        total_members: count.unwrap_or(0),
    })
}

pub async fn list_members(State(svc): Svc) -> Response {
    let store = svc.store().await;
    let views: Vec<MemberView<'_>> = store.all().iter().map(MemberView::from).collect();
    Json(views).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search_members(State(svc): Svc, Query(params): Query<SearchParams>) -> Result<Response, ApiError> {
    let q = params.q.filter(|q| !q.trim().is_empty()).ok_or(ApiError::MissingQuery)?;
    let store = svc.store().await;
    let views: Vec<MemberView<'_>> = store.search(&q).into_iter().map(MemberView::from).collect();
    Ok(Json(views).into_response())
}

pub async fn export_members(State(svc): Svc, Path(format): Path<String>) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse().map_err(|_| ApiError::UnknownFormat(format))?;
    let store = svc.store().await;
    let body = to_export_bytes(format, store.all())?;
    let disposition = format!("attachment; filename=\"{DEFAULT_FILE}.{}\"", format.ext());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub async fn refresh(State(svc): Svc) -> Json<Value> {
    let store = svc.refresh().await;
    Json(json!({ "refreshed": true, "total_members": store.len() }))
}
