use crate::models::Document;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub status: &'static str,
}

pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.store.find_all().await?;
    tracing::debug!(count = documents.len(), "Listed documents");
    Ok(Json(documents))
}

pub async fn insert_document(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(value) = payload.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected document body");
        AppError::from(rejection)
    })?;
    let document = Document::try_from(value)?;

    state.store.insert(document).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertResponse {
            status: "Data inserted",
        }),
    ))
}
