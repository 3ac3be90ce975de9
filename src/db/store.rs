//! Storage port for entity collections.
//!
//! A repository never touches the filesystem directly: it loads its collection
//! once through a [`CollectionStore`] and hands every candidate collection back
//! to it before swapping it in.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::Record;

/// Storage failure while loading or saving a collection.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem error
    Io(std::io::Error),
    /// Content is not a JSON array of objects
    Json(serde_json::Error),
    /// Content parsed but breaks a collection invariant
    Corrupt(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
            StoreError::Json(err) => write!(f, "JSON error: {}", err),
            StoreError::Corrupt(msg) => write!(f, "corrupt collection: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Json(err) => Some(err),
            StoreError::Corrupt(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// Persistence port injected into each repository.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Load the whole collection.
    async fn load(&self) -> Result<Vec<Record>, StoreError>;

    /// Replace the stored collection with `records`.
    async fn save(&self, records: &[Record]) -> Result<(), StoreError>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}

/// One pretty-printed JSON array file per collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Record>, StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist, creating empty collection", self.path.display());
                self.save(&[]).await?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        // Write next to the target and rename so readers never see a half-written file.
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}

/// Process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Record> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_created_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nested/users.json"));

        let records = store.load().await.unwrap();

        assert!(records.is_empty());
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "[]");
    }

    #[tokio::test]
    async fn test_save_writes_pretty_array_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("events.json"));
        let records = vec![record(json!({ "id": "1", "description": "Consulta" }))];

        store.save(&records).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"id\": \"1\",\n    \"description\": \"Consulta\"\n  }\n]"
        );
        assert_eq!(store.load().await.unwrap(), records);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_blank_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.json");
        std::fs::write(&path, "\n").unwrap();

        let records = JsonFileStore::new(path).load().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teachers.json");

        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));

        std::fs::write(&path, r#"{"id": "1"}"#).unwrap();
        let err = JsonFileStore::new(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("gone/users.json"));

        let err = store.save(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        let records = vec![record(json!({ "id": "a" }))];

        store.save(&records).await.unwrap();

        assert_eq!(store.load().await.unwrap(), records);
        assert_eq!(store.location(), "memory");
    }
}
