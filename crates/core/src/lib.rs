pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod store;

pub use domain::delivery::{
    tracking_number, DeliveriesDoc, Delivery, DeliveryId, DeliveryStatus,
};
pub use domain::inventory::{
    InventoryDoc, InventoryItem, Sku, StockStatus, StoreId, StoreRecord,
};
pub use errors::{ErrorKind, ServiceError};
pub use services::delivery::{
    DeliveryService, DeliveryView, OrderConfirmation, RestockPlan, RestockRecommendation,
    StatusUpdate,
};
pub use services::inventory::{
    InventoryReport, InventoryService, ItemStatus, LowStockAlert, StockAdjustment,
};
pub use store::{DocumentStore, MemoryStore, StoreError};
