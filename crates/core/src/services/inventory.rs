use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::domain::inventory::{InventoryDoc, InventoryItem, Sku, StockStatus, StoreId};
use crate::errors::ServiceError;
use crate::store::DocumentStore;

#[derive(Clone, Debug, PartialEq)]
pub struct ItemStatus {
    pub item: InventoryItem,
    pub status: StockStatus,
}

impl From<&InventoryItem> for ItemStatus {
    fn from(item: &InventoryItem) -> Self {
        Self { item: item.clone(), status: item.stock_status() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InventoryReport {
    Item { store_id: StoreId, store_name: String, entry: ItemStatus },
    Store { store_id: StoreId, store_name: String, entries: Vec<ItemStatus> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LowStockAlert {
    pub store_id: StoreId,
    pub store_name: String,
    pub item: InventoryItem,
    pub shortage: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StockAdjustment {
    pub store_id: StoreId,
    pub store_name: String,
    pub sku: Sku,
    pub item_name: String,
    pub unit: String,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub delta: i64,
    pub reason: String,
    pub status: StockStatus,
}

/// Owns the inventory dataset: the only component that writes
/// `inventory.json`. Every read-modify-write cycle runs under the write
/// lock, so concurrent adjustments cannot drop each other's updates.
pub struct InventoryService {
    store: Arc<dyn DocumentStore<InventoryDoc>>,
    write_guard: Mutex<()>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn DocumentStore<InventoryDoc>>) -> Self {
        Self { store, write_guard: Mutex::new(()) }
    }

    /// One item's full record, or every item in the store when `sku` is
    /// omitted, each with its derived stock status.
    pub async fn get_item(
        &self,
        store_id: &StoreId,
        sku: Option<&Sku>,
    ) -> Result<InventoryReport, ServiceError> {
        let doc = self.store.load().await?;
        let store = doc
            .store(store_id)
            .ok_or_else(|| ServiceError::StoreNotFound(store_id.clone()))?;

        match sku {
            Some(sku) => {
                let item = store.inventory.get(sku).ok_or_else(|| ServiceError::SkuNotFound {
                    store_id: store_id.clone(),
                    sku: sku.clone(),
                })?;
                Ok(InventoryReport::Item {
                    store_id: store_id.clone(),
                    store_name: store.name.clone(),
                    entry: ItemStatus::from(item),
                })
            }
            None => Ok(InventoryReport::Store {
                store_id: store_id.clone(),
                store_name: store.name.clone(),
                entries: store.inventory.values().map(ItemStatus::from).collect(),
            }),
        }
    }

    /// Every item at or below its minimum threshold across all stores,
    /// annotated with the computed shortage.
    pub async fn list_low_stock(&self) -> Result<Vec<LowStockAlert>, ServiceError> {
        let doc = self.store.load().await?;
        let mut alerts = Vec::new();
        for (store_id, store) in &doc.stores {
            for item in store.inventory.values() {
                if item.stock_status() == StockStatus::Low {
                    alerts.push(LowStockAlert {
                        store_id: store_id.clone(),
                        store_name: store.name.clone(),
                        item: item.clone(),
                        shortage: item.shortage(),
                    });
                }
            }
        }
        Ok(alerts)
    }

    /// Applies `delta` to the item's stock level. Rejects any change that
    /// would go negative or exceed maximum capacity; nothing is persisted
    /// on rejection. `reason` is free-text metadata carried into the
    /// receipt.
    pub async fn adjust_stock(
        &self,
        store_id: &StoreId,
        sku: &Sku,
        delta: i64,
        reason: &str,
    ) -> Result<StockAdjustment, ServiceError> {
        let _guard = self.write_guard.lock().await;
        let mut doc = self.store.load().await?;

        let store_name = doc
            .store_name(store_id)
            .ok_or_else(|| ServiceError::StoreNotFound(store_id.clone()))?
            .to_string();
        let item = doc.item_mut(store_id, sku).ok_or_else(|| ServiceError::SkuNotFound {
            store_id: store_id.clone(),
            sku: sku.clone(),
        })?;

        let previous_stock = item.current_stock;
        // Wide enough that no u32 stock plus i64 delta can overflow.
        let new_stock = i128::from(previous_stock) + i128::from(delta);
        if new_stock < 0 {
            return Err(ServiceError::Validation(format!(
                "Cannot update inventory. Would result in negative stock ({new_stock})."
            )));
        }
        if new_stock > i128::from(item.maximum_capacity) {
            return Err(ServiceError::Validation(format!(
                "Cannot update inventory. Would exceed maximum capacity ({} {}).",
                item.maximum_capacity, item.unit
            )));
        }

        item.current_stock = new_stock as u32;
        let adjustment = StockAdjustment {
            store_id: store_id.clone(),
            store_name,
            sku: sku.clone(),
            item_name: item.name.clone(),
            unit: item.unit.clone(),
            previous_stock,
            new_stock: item.current_stock,
            delta,
            reason: reason.to_string(),
            status: item.stock_status(),
        };
        self.store.save(&doc).await?;

        info!(
            event_name = "inventory.stock_adjusted",
            store_id = %adjustment.store_id,
            sku = %adjustment.sku,
            delta,
            new_stock = adjustment.new_stock,
            reason,
            "stock level adjusted"
        );
        Ok(adjustment)
    }
}
