use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoreId(pub String);

impl StoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sku(pub String);

impl Sku {
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Low,
    Adequate,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW STOCK",
            Self::Adequate => "ADEQUATE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku: Sku,
    pub name: String,
    pub current_stock: u32,
    pub minimum_threshold: u32,
    pub maximum_capacity: u32,
    pub unit: String,
    pub supplier: String,
    pub cost_per_unit: Decimal,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        if self.current_stock <= self.minimum_threshold {
            StockStatus::Low
        } else {
            StockStatus::Adequate
        }
    }

    /// Units below the minimum threshold; zero when stock is adequate.
    pub fn shortage(&self) -> u32 {
        self.minimum_threshold.saturating_sub(self.current_stock)
    }

    /// Units that can still be received before hitting maximum capacity.
    pub fn headroom(&self) -> u32 {
        self.maximum_capacity.saturating_sub(self.current_stock)
    }

    /// Stock level after `inbound_quantity` arrives, or `None` when the
    /// sum does not fit in `u32` (which always exceeds capacity anyway).
    pub fn projected_stock(&self, inbound_quantity: u32) -> Option<u32> {
        self.current_stock.checked_add(inbound_quantity)
    }

    pub fn capacity_utilization(&self, stock_level: u32) -> f64 {
        if self.maximum_capacity == 0 {
            return 0.0;
        }
        f64::from(stock_level) / f64::from(self.maximum_capacity) * 100.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub inventory: BTreeMap<Sku, InventoryItem>,
}

/// The persisted shape of `inventory.json`. A missing file reads as the
/// empty document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryDoc {
    pub stores: BTreeMap<StoreId, StoreRecord>,
}

impl InventoryDoc {
    pub fn store(&self, store_id: &StoreId) -> Option<&StoreRecord> {
        self.stores.get(store_id)
    }

    pub fn item(&self, store_id: &StoreId, sku: &Sku) -> Option<&InventoryItem> {
        self.stores.get(store_id).and_then(|store| store.inventory.get(sku))
    }

    pub fn item_mut(&mut self, store_id: &StoreId, sku: &Sku) -> Option<&mut InventoryItem> {
        self.stores.get_mut(store_id).and_then(|store| store.inventory.get_mut(sku))
    }

    pub fn store_name(&self, store_id: &StoreId) -> Option<&str> {
        self.stores.get(store_id).map(|store| store.name.as_str())
    }

    pub fn item_name(&self, store_id: &StoreId, sku: &Sku) -> Option<&str> {
        self.item(store_id, sku).map(|item| item.name.as_str())
    }
}
