//! Persistence module: one JSON-backed repository per entity.
//!
//! The JSON files are the source of truth; they are read once at startup and
//! rewritten whole on every mutation.

mod repository;
mod store;

pub use repository::*;
pub use store::*;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::schema::{self, EntitySchema};

/// All entity repositories mounted by the server.
pub struct Collections {
    repos: Vec<Arc<EntityRepository>>,
}

impl Collections {
    /// Open one repository per entity schema on the configured storage backend.
    pub async fn open(config: &Config) -> Result<Self, StoreError> {
        let mut repos = Vec::new();
        for schema in schema::all() {
            let store = open_store(config, schema);
            repos.push(Arc::new(EntityRepository::open(schema, store).await?));
        }
        Ok(Self { repos })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityRepository>> {
        self.repos.iter()
    }

    /// Get the repository of an entity by name.
    pub fn get(&self, entity: &str) -> Option<&Arc<EntityRepository>> {
        self.repos.iter().find(|repo| repo.schema().entity == entity)
    }
}

fn open_store(config: &Config, schema: &EntitySchema) -> Arc<dyn CollectionStore> {
    match config.storage {
        StorageBackend::Json => Arc::new(JsonFileStore::new(
            config.data_dir.join(schema.file_name()),
        )),
        StorageBackend::Memory => Arc::new(MemoryStore::default()),
    }
}
