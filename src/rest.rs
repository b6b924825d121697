// Copyright 2026 Pagevault Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for Pagevault.
//!
//! `GET /archive?url=...` runs the pipeline synchronously and returns
//! the artifact record. `/files` serves the archive directory tree
//! directly off disk. `/` serves the minimal built-in UI.

use crate::archive::Archiver;
use crate::error::ArchiveError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Build the axum Router with all endpoints.
pub fn router(archiver: Arc<Archiver>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let files = ServeDir::new(&archiver.config().archive_root);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/archive", get(handle_archive))
        .nest_service("/files", files)
        .layer(cors)
        .with_state(archiver)
}

/// Serve the REST API until the process exits.
pub async fn serve(port: u16, archiver: Arc<Archiver>) -> anyhow::Result<()> {
    let app = router(archiver);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Pagevault listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve the embedded UI page.
async fn index() -> impl IntoResponse {
    Html(include_str!("ui.html"))
}

async fn health(State(archiver): State<Arc<Archiver>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "max_concurrent": archiver.config().max_concurrent,
    }))
}

#[derive(serde::Deserialize, Default)]
struct ArchiveParams {
    url: Option<String>,
}

/// Synchronous archive endpoint.
async fn handle_archive(
    Query(params): Query<ArchiveParams>,
    State(archiver): State<Arc<Archiver>>,
) -> (StatusCode, Json<Value>) {
    let url = match params.url {
        Some(u) if !u.trim().is_empty() => u,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": ArchiveError::Input.to_string() })),
            );
        }
    };

    match archiver.archive(&url).await {
        Ok(record) => (StatusCode::OK, Json(json!(record))),
        Err(ArchiveError::Input) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": ArchiveError::Input.to_string() })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}
