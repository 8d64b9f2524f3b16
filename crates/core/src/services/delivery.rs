use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::delivery::{
    tracking_number, DeliveriesDoc, Delivery, DeliveryId, DeliveryStatus,
};
use crate::domain::inventory::{InventoryDoc, Sku, StockStatus, StoreId};
use crate::errors::ServiceError;
use crate::store::DocumentStore;

const UNKNOWN_STORE: &str = "Unknown Store";
const UNKNOWN_ITEM: &str = "Unknown Item";

/// A delivery enriched with display names resolved from the inventory
/// dataset at read time. Falls back to placeholders when the referenced
/// store or item no longer resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryView {
    pub delivery: Delivery,
    pub store_name: String,
    pub item_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderConfirmation {
    pub delivery: Delivery,
    pub store_name: String,
    pub item_name: String,
    pub unit: String,
    pub urgent: bool,
    pub current_stock: u32,
    /// Display-only: stock after the delivery arrives. Never persisted.
    pub projected_stock: u32,
    pub capacity_utilization: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusUpdate {
    pub delivery_id: DeliveryId,
    pub previous_status: DeliveryStatus,
    pub new_status: DeliveryStatus,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestockRecommendation {
    pub store_id: StoreId,
    pub store_name: String,
    pub sku: Sku,
    pub item_name: String,
    pub current_stock: u32,
    pub minimum_threshold: u32,
    pub recommended_qty: u32,
    pub unit: String,
    pub supplier: String,
    pub estimated_cost: Decimal,
    pub pending_qty: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestockPlan {
    pub recommendations: Vec<RestockRecommendation>,
    pub total_estimated_cost: Decimal,
}

/// Owns the deliveries dataset; reads inventory for validation and display
/// names but never writes it. The write lock spans every read-modify-write
/// cycle against `deliveries.json`.
pub struct DeliveryService {
    deliveries: Arc<dyn DocumentStore<DeliveriesDoc>>,
    inventory: Arc<dyn DocumentStore<InventoryDoc>>,
    write_guard: Mutex<()>,
}

impl DeliveryService {
    pub fn new(
        deliveries: Arc<dyn DocumentStore<DeliveriesDoc>>,
        inventory: Arc<dyn DocumentStore<InventoryDoc>>,
    ) -> Self {
        Self { deliveries, inventory, write_guard: Mutex::new(()) }
    }

    /// Deliveries filtered by store and/or status (status matched
    /// case-insensitively as text), sorted by scheduled date ascending.
    /// Empty matches are reported as distinct `Empty` messages so the
    /// front-end can tell "nothing matched your filter" from "there are no
    /// deliveries".
    pub async fn list_deliveries(
        &self,
        store_id: Option<&StoreId>,
        status: Option<&str>,
    ) -> Result<Vec<DeliveryView>, ServiceError> {
        let doc = self.deliveries.load().await?;
        let inventory = self.inventory.load().await?;

        let mut deliveries: Vec<&Delivery> = doc.deliveries.iter().collect();

        if let Some(store_id) = store_id {
            deliveries.retain(|delivery| &delivery.store_id == store_id);
            if deliveries.is_empty() {
                return Err(ServiceError::Empty(format!(
                    "No deliveries found for store {store_id}."
                )));
            }
        }

        if let Some(status) = status {
            deliveries
                .retain(|delivery| delivery.status.as_str().eq_ignore_ascii_case(status.trim()));
            if deliveries.is_empty() {
                let store_suffix = store_id
                    .map(|store_id| format!(" for store {store_id}"))
                    .unwrap_or_default();
                return Err(ServiceError::Empty(format!(
                    "No deliveries found with status '{status}'{store_suffix}."
                )));
            }
        }

        if deliveries.is_empty() {
            return Err(ServiceError::Empty("No deliveries found.".to_string()));
        }

        deliveries.sort_by_key(|delivery| delivery.scheduled_delivery_date);

        Ok(deliveries
            .into_iter()
            .map(|delivery| DeliveryView {
                store_name: inventory
                    .store_name(&delivery.store_id)
                    .unwrap_or(UNKNOWN_STORE)
                    .to_string(),
                item_name: inventory
                    .item_name(&delivery.store_id, &delivery.sku)
                    .unwrap_or(UNKNOWN_ITEM)
                    .to_string(),
                delivery: delivery.clone(),
            })
            .collect())
    }

    /// Places a restock order. Validates against the inventory data, then
    /// appends the delivery under the write lock. Stock itself is not
    /// touched; receiving is recorded separately through the inventory
    /// service.
    pub async fn place_order(
        &self,
        store_id: &StoreId,
        sku: &Sku,
        quantity: u32,
        urgent: bool,
    ) -> Result<OrderConfirmation, ServiceError> {
        if quantity == 0 {
            return Err(ServiceError::Validation(
                "Order quantity must be greater than zero.".to_string(),
            ));
        }

        let inventory = self.inventory.load().await?;
        let store = inventory
            .store(store_id)
            .ok_or_else(|| ServiceError::StoreNotFound(store_id.clone()))?;
        let item = store.inventory.get(sku).ok_or_else(|| ServiceError::SkuNotFound {
            store_id: store_id.clone(),
            sku: sku.clone(),
        })?;

        let projected_stock = item
            .projected_stock(quantity)
            .filter(|projected| *projected <= item.maximum_capacity)
            .ok_or_else(|| {
                ServiceError::Validation(format!(
                    "Order quantity would exceed maximum capacity. Current: {}, Max: {}, Requested: {quantity}",
                    item.current_stock, item.maximum_capacity
                ))
            })?;

        let order_date = Utc::now();
        let lead_time = if urgent { Duration::days(1) } else { Duration::days(3) };

        let _guard = self.write_guard.lock().await;
        let mut doc = self.deliveries.load().await?;
        let delivery = Delivery {
            delivery_id: doc.next_delivery_id(),
            store_id: store_id.clone(),
            sku: sku.clone(),
            quantity,
            status: DeliveryStatus::Pending,
            order_date,
            scheduled_delivery_date: order_date + lead_time,
            actual_delivery_date: None,
            supplier: item.supplier.clone(),
            cost_per_unit: item.cost_per_unit,
            total_cost: item.cost_per_unit * Decimal::from(quantity),
            tracking_number: tracking_number(&item.supplier, order_date),
        };
        doc.deliveries.push(delivery.clone());
        self.deliveries.save(&doc).await?;

        info!(
            event_name = "delivery.order_placed",
            delivery_id = %delivery.delivery_id,
            store_id = %store_id,
            sku = %sku,
            quantity,
            urgent,
            tracking_number = %delivery.tracking_number,
            "delivery order placed"
        );

        Ok(OrderConfirmation {
            store_name: store.name.clone(),
            item_name: item.name.clone(),
            unit: item.unit.clone(),
            urgent,
            current_stock: item.current_stock,
            projected_stock,
            capacity_utilization: item.capacity_utilization(projected_stock),
            delivery,
        })
    }

    /// Sets a delivery's status to any status present in the persisted
    /// status table. There is intentionally no transition graph; delivered
    /// orders can move back to pending. Every transition to delivered
    /// stamps the actual delivery date.
    pub async fn update_status(
        &self,
        delivery_id: &DeliveryId,
        new_status: &str,
    ) -> Result<StatusUpdate, ServiceError> {
        let _guard = self.write_guard.lock().await;
        let mut doc = self.deliveries.load().await?;

        let position = doc
            .deliveries
            .iter()
            .position(|delivery| &delivery.delivery_id == delivery_id)
            .ok_or_else(|| ServiceError::DeliveryNotFound(delivery_id.clone()))?;

        let key = new_status.trim().to_ascii_lowercase();
        let status = match DeliveryStatus::parse(&key) {
            Some(status) if doc.delivery_statuses.contains_key(&key) => status,
            _ => {
                return Err(ServiceError::Validation(format!(
                    "Invalid status '{new_status}'. Valid statuses: {}",
                    doc.valid_statuses().join(", ")
                )));
            }
        };
        let description = doc.delivery_statuses[&key].clone();

        let delivery = &mut doc.deliveries[position];
        let previous_status = delivery.status;
        delivery.status = status;
        if status == DeliveryStatus::Delivered {
            delivery.actual_delivery_date = Some(Utc::now());
        }
        self.deliveries.save(&doc).await?;

        info!(
            event_name = "delivery.status_updated",
            delivery_id = %delivery_id,
            previous_status = %previous_status,
            new_status = %status,
            "delivery status updated"
        );

        Ok(StatusUpdate {
            delivery_id: delivery_id.clone(),
            previous_status,
            new_status: status,
            description,
        })
    }

    /// Restock proposals for every low-stock item: shortage plus a 50%
    /// threshold buffer, net of quantity already inbound for that exact
    /// (store, sku), clamped so the order alone cannot exceed remaining
    /// capacity. Items whose net need is zero or negative are suppressed.
    pub async fn recommend_restocks(&self) -> Result<RestockPlan, ServiceError> {
        let inventory = self.inventory.load().await?;
        let deliveries = self.deliveries.load().await?;

        let mut plan = RestockPlan::default();
        for (store_id, store) in &inventory.stores {
            for item in store.inventory.values() {
                if item.stock_status() != StockStatus::Low {
                    continue;
                }

                let pending_qty = deliveries.inbound_quantity(store_id, &item.sku);
                let shortage = i64::from(item.shortage());
                let buffer = i64::from(item.minimum_threshold / 2);
                let net = shortage + buffer - pending_qty as i64;
                if net <= 0 {
                    continue;
                }

                let recommended_qty = net.min(i64::from(item.headroom())) as u32;
                // Estimated cost follows the clamped quantity so the number
                // the user sees matches the order we are proposing.
                let estimated_cost = item.cost_per_unit * Decimal::from(recommended_qty);
                plan.total_estimated_cost += estimated_cost;
                plan.recommendations.push(RestockRecommendation {
                    store_id: store_id.clone(),
                    store_name: store.name.clone(),
                    sku: item.sku.clone(),
                    item_name: item.name.clone(),
                    current_stock: item.current_stock,
                    minimum_threshold: item.minimum_threshold,
                    recommended_qty,
                    unit: item.unit.clone(),
                    supplier: item.supplier.clone(),
                    estimated_cost,
                    pending_qty,
                });
            }
        }
        Ok(plan)
    }
}
