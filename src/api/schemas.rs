//! Schema metadata endpoints for documentation generators.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::schema::EntitySchema;
use crate::AppState;

/// GET /schemas - Describe every mounted entity.
pub async fn list_schemas(State(state): State<AppState>) -> Json<Vec<&'static EntitySchema>> {
    Json(state.collections.iter().map(|repo| repo.schema()).collect())
}

/// GET /schemas/:entity - Describe one entity.
pub async fn get_schema(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> ApiResult<&'static EntitySchema> {
    state
        .collections
        .get(&entity)
        .map(|repo| Json(repo.schema()))
        .ok_or_else(|| AppError::NotFound(format!("Entidade '{}' não encontrada", entity)))
}
