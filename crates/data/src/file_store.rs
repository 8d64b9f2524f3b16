use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use stockline_core::store::{DocumentStore, StoreError};

/// JSON document on disk. A missing file reads as the empty document; every
/// save rewrites the whole file, pretty-printed, in a single write call.
/// There is no cross-process locking; the owning service's write lock is
/// the only mutual exclusion.
pub struct FileStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> FileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _doc: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T> DocumentStore<T> for FileStore<T>
where
    T: Default + Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<T, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document missing, using empty default");
                return Ok(T::default());
            }
            Err(error) => {
                return Err(StoreError::Io(format!("{}: {error}", self.path.display())));
            }
        };
        serde_json::from_slice(&bytes)
            .map_err(|error| StoreError::Decode(format!("{}: {error}", self.path.display())))
    }

    async fn save(&self, doc: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|error| StoreError::Encode(error.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|error| StoreError::Io(format!("{}: {error}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use stockline_core::store::{DocumentStore, StoreError};
    use stockline_core::InventoryDoc;

    use super::FileStore;
    use crate::fixtures::demo_inventory;

    #[tokio::test]
    async fn missing_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::<InventoryDoc>::new(dir.path().join("inventory.json"));
        let doc = store.load().await.expect("load");
        assert!(doc.stores.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_pretty_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("inventory.json");
        let store = FileStore::<InventoryDoc>::new(path.clone());

        let doc = demo_inventory();
        store.save(&doc).await.expect("save");

        let raw = std::fs::read_to_string(&path).expect("read file");
        assert!(raw.contains('\n'), "document is pretty-printed");
        assert!(raw.contains("\"stores\""));

        assert_eq!(store.load().await.expect("reload"), doc);
    }

    #[tokio::test]
    async fn corrupt_document_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, b"{ not json").expect("write garbage");

        let store = FileStore::<InventoryDoc>::new(path);
        let error = store.load().await.unwrap_err();
        assert!(matches!(error, StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_parent_directory_fails_on_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent").join("inventory.json");

        let store = FileStore::<InventoryDoc>::new(path);
        let error = store.save(&demo_inventory()).await.unwrap_err();
        assert!(matches!(error, StoreError::Io(_)));
    }
}
