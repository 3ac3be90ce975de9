//! REST API module.
//!
//! Every entity gets the same five routes, nested under its own prefix with its
//! repository as router state.

mod entities;
mod schemas;

pub use entities::*;
pub use schemas::*;

use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::db::EntityRepository;
use crate::errors::AppError;

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Routes of one entity collection, to be nested under its prefix.
pub fn entity_routes<S>(repo: Arc<EntityRepository>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/{id}",
            get(get_record).put(replace_record).delete(delete_record),
        )
        .with_state(repo)
}
