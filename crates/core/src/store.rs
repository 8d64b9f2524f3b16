use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document i/o failed: {0}")]
    Io(String),
    #[error("document decode failed: {0}")]
    Decode(String),
    #[error("document encode failed: {0}")]
    Encode(String),
}

/// Whole-document persistence for one dataset. Every mutation rewrites the
/// full document; there are no partial writes. The owning service is
/// responsible for holding its write lock across a load/save cycle.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync {
    async fn load(&self) -> Result<T, StoreError>;
    async fn save(&self, doc: &T) -> Result<(), StoreError>;
}

/// In-process store used by tests and embedders that do not want files.
pub struct MemoryStore<T> {
    doc: Mutex<T>,
}

impl<T> MemoryStore<T>
where
    T: Clone + Default + Send,
{
    pub fn new() -> Self {
        Self { doc: Mutex::new(T::default()) }
    }

    pub fn with(doc: T) -> Self {
        Self { doc: Mutex::new(doc) }
    }
}

impl<T> Default for MemoryStore<T>
where
    T: Clone + Default + Send,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> DocumentStore<T> for MemoryStore<T>
where
    T: Clone + Default + Send + Sync,
{
    async fn load(&self) -> Result<T, StoreError> {
        Ok(self.doc.lock().await.clone())
    }

    async fn save(&self, doc: &T) -> Result<(), StoreError> {
        *self.doc.lock().await = doc.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::inventory::InventoryDoc;

    use super::{DocumentStore, MemoryStore};

    #[tokio::test]
    async fn memory_store_starts_empty_and_round_trips() {
        let store = MemoryStore::<InventoryDoc>::new();
        let doc = store.load().await.expect("load default");
        assert!(doc.stores.is_empty());

        store.save(&doc).await.expect("save");
        assert_eq!(store.load().await.expect("reload"), doc);
    }
}
