//! Entity API endpoints, shared by every collection.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::ApiResult;
use crate::db::EntityRepository;
use crate::errors::AppError;
use crate::models::{record_id, CreatedResponse, DeletedResponse, Record};

type Repo = State<Arc<EntityRepository>>;

/// GET /<entity> - List all records.
pub async fn list_records(State(repo): Repo) -> Json<Vec<Record>> {
    let records = repo.list().await;
    tracing::debug!("Listing {} {}", records.len(), repo.schema().entity);
    Json(records)
}

/// GET /<entity>/:id - Get a single record.
pub async fn get_record(State(repo): Repo, Path(id): Path<String>) -> ApiResult<Record> {
    repo.get(&id).await.map(Json)
}

/// POST /<entity> - Create a new record.
pub async fn create_record(
    State(repo): Repo,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<CreatedResponse> {
    let record = repo.create(decode(body)?).await?;
    let schema = repo.schema();

    Ok(Json(CreatedResponse {
        sucesso: schema.messages.created.to_string(),
        id: record_id(&record).unwrap_or_default().to_string(),
        defaults: schema.defaulted_values(&record),
    }))
}

/// PUT /<entity>/:id - Replace a record.
pub async fn replace_record(
    State(repo): Repo,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Record> {
    repo.replace(&id, decode(body)?).await.map(Json)
}

/// DELETE /<entity>/:id - Delete a record.
pub async fn delete_record(State(repo): Repo, Path(id): Path<String>) -> ApiResult<DeletedResponse> {
    repo.delete(&id).await?;

    Ok(Json(DeletedResponse {
        mensagem: repo.schema().messages.deleted.to_string(),
    }))
}

/// Unwrap a JSON body, answering decoding failures with the `{erro}` shape.
fn decode(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                Err(AppError::PayloadTooLarge(rejection.body_text()))
            } else {
                Err(AppError::BadRequest(rejection.body_text()))
            }
        }
    }
}
