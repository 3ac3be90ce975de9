//! Response bodies for the entity endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body returned by `POST /<entity>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub sucesso: String,
    pub id: String,
    /// Values the server filled in (e.g. an event's `date`).
    #[serde(flatten)]
    pub defaults: Map<String, Value>,
}

/// Body returned by `DELETE /<entity>/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub mensagem: String,
}
