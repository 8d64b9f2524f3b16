use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use stockline_core::{
    tracking_number, DeliveriesDoc, Delivery, DeliveryId, DeliveryStatus, InventoryDoc,
    InventoryItem, Sku, StoreId, StoreRecord,
};

/// Demo dataset: three stores, five suppliers, a couple of items already
/// below threshold so the low-stock and recommendation flows have something
/// to say out of the box.
pub fn demo_inventory() -> InventoryDoc {
    let mut doc = InventoryDoc::default();
    doc.stores.insert(
        StoreId::new("12"),
        store(
            "Downtown Store",
            "123 Main St, Seattle, WA",
            vec![
                item("SKU1001", "Espresso Beans", 12, 20, 100, "bags", "Coffee Co.", 1250),
                item("SKU1002", "Earl Grey Tea", 45, 15, 120, "boxes", "Tea Masters", 875),
                item("SKU1003", "Chocolate Muffins", 8, 25, 80, "trays", "Sweet Treats Inc.", 1500),
            ],
        ),
    );
    doc.stores.insert(
        StoreId::new("34"),
        store(
            "Eastside Store",
            "456 Oak Ave, Bellevue, WA",
            vec![
                item("SKU1001", "Espresso Beans", 60, 20, 100, "bags", "Coffee Co.", 1250),
                item("SKU2001", "Trail Mix", 18, 30, 150, "cases", "Healthy Snacks Co.", 2240),
                item("SKU2002", "Whole Milk", 40, 24, 96, "crates", "Dairy Fresh", 1820),
            ],
        ),
    );
    doc.stores.insert(
        StoreId::new("56"),
        store(
            "Northgate Store",
            "789 Pine St, Seattle, WA",
            vec![
                item("SKU1002", "Earl Grey Tea", 10, 15, 120, "boxes", "Tea Masters", 875),
                item("SKU2001", "Trail Mix", 75, 30, 150, "cases", "Healthy Snacks Co.", 2240),
            ],
        ),
    );
    doc
}

/// The status-description table persisted alongside the delivery log; its
/// keys define the valid status set.
pub fn status_descriptions() -> BTreeMap<String, String> {
    [
        ("pending", "Order received and awaiting processing"),
        ("scheduled", "Delivery scheduled and confirmed with supplier"),
        ("in_transit", "Items are on the way to the store"),
        ("delivered", "Items delivered and received at the store"),
        ("cancelled", "Delivery was cancelled"),
        ("delayed", "Delivery is running behind schedule"),
    ]
    .into_iter()
    .map(|(status, description)| (status.to_string(), description.to_string()))
    .collect()
}

pub fn demo_deliveries() -> DeliveriesDoc {
    let ordered = Utc::now() - Duration::days(1);
    let cost = Decimal::new(1250, 2);
    DeliveriesDoc {
        deliveries: vec![Delivery {
            delivery_id: DeliveryId::new("DEL-001"),
            store_id: StoreId::new("12"),
            sku: Sku::new("SKU1001"),
            quantity: 10,
            status: DeliveryStatus::InTransit,
            order_date: ordered,
            scheduled_delivery_date: ordered + Duration::days(3),
            actual_delivery_date: None,
            supplier: "Coffee Co.".to_string(),
            cost_per_unit: cost,
            total_cost: cost * Decimal::from(10u32),
            tracking_number: tracking_number("Coffee Co.", ordered),
        }],
        delivery_statuses: status_descriptions(),
    }
}

fn store(name: &str, address: &str, items: Vec<InventoryItem>) -> StoreRecord {
    StoreRecord {
        name: name.to_string(),
        address: Some(address.to_string()),
        inventory: items.into_iter().map(|item| (item.sku.clone(), item)).collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    sku: &str,
    name: &str,
    current_stock: u32,
    minimum_threshold: u32,
    maximum_capacity: u32,
    unit: &str,
    supplier: &str,
    cost_cents: i64,
) -> InventoryItem {
    InventoryItem {
        sku: Sku::new(sku),
        name: name.to_string(),
        current_stock,
        minimum_threshold,
        maximum_capacity,
        unit: unit.to_string(),
        supplier: supplier.to_string(),
        cost_per_unit: Decimal::new(cost_cents, 2),
    }
}

#[cfg(test)]
mod tests {
    use stockline_core::{Sku, StockStatus, StoreId};

    use super::{demo_deliveries, demo_inventory};

    #[test]
    fn demo_inventory_includes_low_stock_items() {
        let doc = demo_inventory();
        assert_eq!(doc.stores.len(), 3);

        let low = doc
            .item(&StoreId::new("12"), &Sku::new("SKU1001"))
            .expect("seeded item");
        assert_eq!(low.stock_status(), StockStatus::Low);
    }

    #[test]
    fn demo_deliveries_carry_the_full_status_table() {
        let doc = demo_deliveries();
        assert_eq!(doc.delivery_statuses.len(), 6);
        assert!(doc.delivery_statuses.contains_key("in_transit"));
        assert_eq!(doc.deliveries.len(), 1);
    }

    #[test]
    fn fixture_costs_are_positive() {
        let doc = demo_inventory();
        for store in doc.stores.values() {
            for item in store.inventory.values() {
                assert!(
                    item.cost_per_unit > rust_decimal::Decimal::ZERO,
                    "{} should have a positive cost",
                    item.sku
                );
            }
        }
    }
}
