//! Generic repository for CRUD operations over one entity collection.
//!
//! Mutations hold the collection's write lock while they build the next
//! collection, persist it and swap it in. A failed save leaves memory as it was.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::{CollectionStore, StoreError};
use crate::errors::AppError;
use crate::models::{record_id, with_id, Record, ID_FIELD};
use crate::schema::{EntitySchema, IdPolicy};

/// Repository owning one entity collection.
pub struct EntityRepository {
    schema: &'static EntitySchema,
    store: Arc<dyn CollectionStore>,
    records: RwLock<Vec<Record>>,
}

impl EntityRepository {
    /// Load the collection from `store` and check its ids.
    pub async fn open(
        schema: &'static EntitySchema,
        store: Arc<dyn CollectionStore>,
    ) -> Result<Self, StoreError> {
        let records = store.load().await?;
        check_ids(&records)?;

        tracing::info!(
            "Loaded {} {} from {}",
            records.len(),
            schema.entity,
            store.location()
        );

        Ok(Self {
            schema,
            store,
            records: RwLock::new(records),
        })
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// List all records, sorted by the schema's display field if it has one.
    pub async fn list(&self) -> Vec<Record> {
        let mut records = self.records.read().await.clone();
        self.schema.sort(&mut records);
        records
    }

    /// Get a record by ID.
    pub async fn get(&self, id: &str) -> Result<Record, AppError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record_id(record) == Some(id))
            .cloned()
            .ok_or_else(|| self.schema.not_found())
    }

    /// Validate `body` and append it as a new record.
    pub async fn create(&self, body: Value) -> Result<Record, AppError> {
        let payload = self.schema.prepare(body)?;

        let mut records = self.records.write().await;

        let id = match self.schema.id_policy {
            IdPolicy::ServerGenerated => uuid::Uuid::new_v4().to_string(),
            IdPolicy::ClientSupplied => payload
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::Validation(format!("{} precisa ter um 'id'", self.schema.label))
                })?,
        };

        if position(&records, &id).is_some() {
            return Err(AppError::Conflict(format!(
                "{} com id '{}' já existe",
                self.schema.label, id
            )));
        }

        let record = with_id(&id, payload);
        let mut next = records.clone();
        next.push(record.clone());
        self.store.save(&next).await?;
        *records = next;

        tracing::info!("Created {} {}", self.schema.entity, id);
        Ok(record)
    }

    /// Replace the whole record `id` with `body`; the id itself never changes.
    pub async fn replace(&self, id: &str, body: Value) -> Result<Record, AppError> {
        let mut records = self.records.write().await;

        let index = position(&records, id).ok_or_else(|| self.schema.not_found())?;
        let payload = self.schema.prepare(body)?;

        let record = with_id(id, payload);
        let mut next = records.clone();
        next[index] = record.clone();
        self.store.save(&next).await?;
        *records = next;

        tracing::info!("Replaced {} {}", self.schema.entity, id);
        Ok(record)
    }

    /// Delete the record `id`.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut records = self.records.write().await;

        let index = position(&records, id).ok_or_else(|| self.schema.not_found())?;

        let mut next = records.clone();
        next.remove(index);
        self.store.save(&next).await?;
        *records = next;

        tracing::info!("Deleted {} {}", self.schema.entity, id);
        Ok(())
    }
}

fn position(records: &[Record], id: &str) -> Option<usize> {
    records.iter().position(|record| record_id(record) == Some(id))
}

/// Every stored record needs a string id, unique within the collection.
fn check_ids(records: &[Record]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = record_id(record).ok_or_else(|| {
            StoreError::Corrupt(format!("record at index {} has no string 'id'", index))
        })?;
        if !seen.insert(id) {
            return Err(StoreError::Corrupt(format!("duplicate id '{}'", id)));
        }
    }
    Ok(())
}
