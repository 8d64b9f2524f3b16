use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::Serialize;

use stockline_core::{
    DeliveryView, InventoryReport, LowStockAlert, OrderConfirmation, RestockPlan, ServiceError,
    StatusUpdate, StockAdjustment,
};

use crate::adaptive::{AdaptiveCard, CardBuilder, Spacing, TextColor, TextSize, TextWeight};

/// What a service operation looks like to the chat surface: either a
/// plain-text block or an adaptive card. Serialized as
/// `{"contentType": ..., "content": ...}` for the hosting framework.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "contentType", content = "content")]
pub enum ResponsePayload {
    Text(String),
    AdaptiveCard(AdaptiveCard),
}

impl ResponsePayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::AdaptiveCard(_) => None,
        }
    }
}

fn money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

fn timestamp(value: chrono::DateTime<chrono::Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn inventory_report(report: &InventoryReport) -> ResponsePayload {
    match report {
        InventoryReport::Item { store_id, store_name, entry } => {
            let item = &entry.item;
            ResponsePayload::text(format!(
                "Inventory Status for {store_name} (Store {store_id}):\n\
                 SKU: {} - {}\n\
                 Current Stock: {} {}\n\
                 Minimum Threshold: {} {}\n\
                 Maximum Capacity: {} {}\n\
                 Status: {}\n\
                 Supplier: {}\n\
                 Cost per Unit: {}",
                item.sku,
                item.name,
                item.current_stock,
                item.unit,
                item.minimum_threshold,
                item.unit,
                item.maximum_capacity,
                item.unit,
                entry.status.label(),
                item.supplier,
                money(item.cost_per_unit),
            ))
        }
        InventoryReport::Store { store_id, store_name, entries } => {
            let mut text = format!("Full Inventory for {store_name} (Store {store_id}):\n");
            for entry in entries {
                let item = &entry.item;
                let _ = writeln!(
                    text,
                    "- {}: {} - {} {} ({})",
                    item.sku,
                    item.name,
                    item.current_stock,
                    item.unit,
                    entry.status.label()
                );
            }
            ResponsePayload::Text(text)
        }
    }
}

pub fn low_stock_alerts(alerts: &[LowStockAlert]) -> ResponsePayload {
    if alerts.is_empty() {
        return ResponsePayload::text(
            "No low stock alerts found. All items are adequately stocked.",
        );
    }

    let mut text = String::from("🚨 LOW STOCK ALERTS:\n\n");
    for alert in alerts {
        let item = &alert.item;
        let _ = writeln!(
            text,
            "Store {} ({}):\n\
             - SKU {}: {}\n\
             - Current: {} {}\n\
             - Minimum: {} {}\n\
             - Shortage: {} {}\n\
             - Supplier: {}\n",
            alert.store_id,
            alert.store_name,
            item.sku,
            item.name,
            item.current_stock,
            item.unit,
            item.minimum_threshold,
            item.unit,
            alert.shortage,
            item.unit,
            item.supplier,
        );
    }
    ResponsePayload::Text(text)
}

pub fn stock_adjustment(adjustment: &StockAdjustment) -> ResponsePayload {
    ResponsePayload::text(format!(
        "Inventory updated for {} (Store {}):\n\
         SKU {} - {}\n\
         Previous Stock: {} {}\n\
         Change: {:+} {} ({})\n\
         New Stock: {} {}\n\
         Status: {}",
        adjustment.store_name,
        adjustment.store_id,
        adjustment.sku,
        adjustment.item_name,
        adjustment.previous_stock,
        adjustment.unit,
        adjustment.delta,
        adjustment.unit,
        adjustment.reason,
        adjustment.new_stock,
        adjustment.unit,
        adjustment.status.label(),
    ))
}

pub fn delivery_schedule(views: &[DeliveryView]) -> ResponsePayload {
    let mut text = String::from("📦 DELIVERY SCHEDULE:\n\n");
    for view in views {
        let delivery = &view.delivery;
        let _ = writeln!(
            text,
            "Delivery ID: {}\n\
             Store: {} (ID: {})\n\
             Item: {} (SKU: {})\n\
             Quantity: {} units\n\
             Status: {}\n\
             Scheduled: {}\n\
             Supplier: {}\n\
             Total Cost: {}\n\
             Tracking: {}\n",
            delivery.delivery_id,
            view.store_name,
            delivery.store_id,
            view.item_name,
            delivery.sku,
            delivery.quantity,
            delivery.status.as_str().to_uppercase(),
            timestamp(delivery.scheduled_delivery_date),
            delivery.supplier,
            money(delivery.total_cost),
            delivery.tracking_number,
        );
    }
    ResponsePayload::Text(text)
}

pub fn order_confirmation(confirmation: &OrderConfirmation) -> ResponsePayload {
    let delivery = &confirmation.delivery;
    let priority = if confirmation.urgent { "URGENT" } else { "STANDARD" };

    let card = CardBuilder::new()
        .text_block(|text| {
            text.text("Delivery Order Placed Successfully!")
                .size(TextSize::Large)
                .weight(TextWeight::Bolder)
                .color(TextColor::Good)
                .spacing(Spacing::Medium);
        })
        .fact_set(|facts| {
            facts
                .fact("Delivery ID:", delivery.delivery_id.to_string())
                .fact(
                    "Store:",
                    format!("{} (ID: {})", confirmation.store_name, delivery.store_id),
                )
                .fact("Item:", format!("{} (SKU: {})", confirmation.item_name, delivery.sku))
                .fact("Quantity:", format!("{} {}", delivery.quantity, confirmation.unit))
                .fact("Priority:", priority)
                .fact("Supplier:", delivery.supplier.clone())
                .fact("Unit Cost:", money(delivery.cost_per_unit))
                .fact("Total Cost:", money(delivery.total_cost))
                .fact("Tracking Number:", delivery.tracking_number.clone())
                .fact("Scheduled Delivery:", timestamp(delivery.scheduled_delivery_date))
                .spacing(Spacing::Medium);
        })
        .text_block(|text| {
            text.text("Inventory Update:")
                .weight(TextWeight::Bolder)
                .size(TextSize::Medium)
                .spacing(Spacing::Large);
        })
        .fact_set(|facts| {
            facts
                .fact(
                    "Current Inventory:",
                    format!("{} {}", confirmation.current_stock, confirmation.unit),
                )
                .fact(
                    "After Delivery:",
                    format!("{} {}", confirmation.projected_stock, confirmation.unit),
                )
                .fact(
                    "Capacity Utilization:",
                    format!("{:.1}%", confirmation.capacity_utilization),
                );
        })
        .open_url(
            "Track Delivery",
            format!("https://tracking.example.com/{}", delivery.tracking_number),
        )
        .build();

    ResponsePayload::AdaptiveCard(card)
}

pub fn status_update(update: &StatusUpdate) -> ResponsePayload {
    ResponsePayload::text(format!(
        "Delivery status updated:\n\
         Delivery ID: {}\n\
         Previous Status: {}\n\
         New Status: {}\n\
         Description: {}",
        update.delivery_id,
        update.previous_status.as_str().to_uppercase(),
        update.new_status.as_str().to_uppercase(),
        update.description,
    ))
}

pub fn restock_plan(plan: &RestockPlan) -> ResponsePayload {
    if plan.recommendations.is_empty() {
        return ResponsePayload::text(
            "🎉 No delivery recommendations needed. All items are adequately stocked or have pending deliveries.",
        );
    }

    let mut text = String::from("📋 DELIVERY RECOMMENDATIONS:\n\n");
    for rec in &plan.recommendations {
        let _ = write!(
            text,
            "Store {} - {}:\n\
             SKU {}: {}\n\
             Current Stock: {} {}\n\
             Minimum Threshold: {} {}\n\
             Recommended Order: {} {}\n\
             Supplier: {}\n\
             Estimated Cost: {}\n",
            rec.store_id,
            rec.store_name,
            rec.sku,
            rec.item_name,
            rec.current_stock,
            rec.unit,
            rec.minimum_threshold,
            rec.unit,
            rec.recommended_qty,
            rec.unit,
            rec.supplier,
            money(rec.estimated_cost),
        );
        if rec.pending_qty > 0 {
            let _ = writeln!(text, "⚠️ Pending Delivery: {} {}", rec.pending_qty, rec.unit);
        }
        text.push('\n');
    }
    let _ = write!(text, "💰 Total Estimated Cost: {}", money(plan.total_estimated_cost));
    ResponsePayload::Text(text)
}

/// NotFound, Validation, and Empty messages are relayed to the user as-is;
/// storage failures are not rendered here and should surface as faults.
pub fn service_error(error: &ServiceError) -> ResponsePayload {
    ResponsePayload::text(error.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use stockline_core::{
        Delivery, DeliveryId, DeliveryStatus, DeliveryView, InventoryItem, InventoryReport,
        ItemStatus, LowStockAlert, OrderConfirmation, RestockPlan, RestockRecommendation,
        ServiceError, Sku, StatusUpdate, StockStatus, StoreId,
    };

    use super::{
        delivery_schedule, inventory_report, low_stock_alerts, order_confirmation, restock_plan,
        service_error, status_update, ResponsePayload,
    };

    fn item() -> InventoryItem {
        InventoryItem {
            sku: Sku::new("SKU1"),
            name: "Espresso Beans".to_string(),
            current_stock: 10,
            minimum_threshold: 20,
            maximum_capacity: 100,
            unit: "bags".to_string(),
            supplier: "Coffee Co.".to_string(),
            cost_per_unit: Decimal::new(1250, 2),
        }
    }

    fn delivery() -> Delivery {
        let ordered = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        Delivery {
            delivery_id: DeliveryId::new("DEL-001"),
            store_id: StoreId::new("12"),
            sku: Sku::new("SKU1"),
            quantity: 40,
            status: DeliveryStatus::Pending,
            order_date: ordered,
            scheduled_delivery_date: ordered + Duration::days(3),
            actual_delivery_date: None,
            supplier: "Coffee Co.".to_string(),
            cost_per_unit: Decimal::new(1250, 2),
            total_cost: Decimal::new(50000, 2),
            tracking_number: "CC03140930".to_string(),
        }
    }

    #[test]
    fn single_item_report_renders_full_record() {
        let payload = inventory_report(&InventoryReport::Item {
            store_id: StoreId::new("12"),
            store_name: "Downtown Store".to_string(),
            entry: ItemStatus { item: item(), status: StockStatus::Low },
        });

        let text = payload.as_text().expect("text payload");
        assert!(text.starts_with("Inventory Status for Downtown Store (Store 12):"));
        assert!(text.contains("Status: LOW STOCK"));
        assert!(text.contains("Cost per Unit: $12.50"));
    }

    #[test]
    fn store_report_renders_one_line_per_item() {
        let payload = inventory_report(&InventoryReport::Store {
            store_id: StoreId::new("12"),
            store_name: "Downtown Store".to_string(),
            entries: vec![ItemStatus { item: item(), status: StockStatus::Low }],
        });

        let text = payload.as_text().expect("text payload");
        assert!(text.contains("- SKU1: Espresso Beans - 10 bags (LOW STOCK)"));
    }

    #[test]
    fn empty_low_stock_scan_renders_all_clear() {
        let text = low_stock_alerts(&[]);
        assert_eq!(
            text.as_text(),
            Some("No low stock alerts found. All items are adequately stocked.")
        );

        let alerts = vec![LowStockAlert {
            store_id: StoreId::new("12"),
            store_name: "Downtown Store".to_string(),
            item: item(),
            shortage: 10,
        }];
        let rendered = low_stock_alerts(&alerts);
        let text = rendered.as_text().expect("text payload");
        assert!(text.starts_with("🚨 LOW STOCK ALERTS:"));
        assert!(text.contains("- Shortage: 10 bags"));
    }

    #[test]
    fn schedule_uppercases_status_and_formats_cost() {
        let payload = delivery_schedule(&[DeliveryView {
            delivery: Delivery { status: DeliveryStatus::InTransit, ..delivery() },
            store_name: "Downtown Store".to_string(),
            item_name: "Espresso Beans".to_string(),
        }]);

        let text = payload.as_text().expect("text payload");
        assert!(text.starts_with("📦 DELIVERY SCHEDULE:"));
        assert!(text.contains("Status: IN_TRANSIT"));
        assert!(text.contains("Total Cost: $500.00"));
        assert!(text.contains("Scheduled: 2026-03-17 09:30"));
    }

    #[test]
    fn order_confirmation_is_a_card_with_projection_and_tracking_link() {
        let payload = order_confirmation(&OrderConfirmation {
            delivery: delivery(),
            store_name: "Downtown Store".to_string(),
            item_name: "Espresso Beans".to_string(),
            unit: "bags".to_string(),
            urgent: true,
            current_stock: 10,
            projected_stock: 50,
            capacity_utilization: 50.0,
        });

        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["contentType"], "AdaptiveCard");
        let card = &json["content"];
        assert_eq!(card["type"], "AdaptiveCard");
        assert_eq!(card["body"][0]["text"], "Delivery Order Placed Successfully!");

        let facts = card["body"][1]["facts"].as_array().expect("order facts");
        assert!(facts
            .iter()
            .any(|fact| fact["title"] == "Priority:" && fact["value"] == "URGENT"));

        let projection = card["body"][3]["facts"].as_array().expect("projection facts");
        assert!(projection
            .iter()
            .any(|fact| fact["title"] == "After Delivery:" && fact["value"] == "50 bags"));
        assert!(projection
            .iter()
            .any(|fact| fact["title"] == "Capacity Utilization:" && fact["value"] == "50.0%"));

        assert_eq!(
            card["actions"][0]["url"],
            "https://tracking.example.com/CC03140930"
        );
    }

    #[test]
    fn status_update_renders_previous_and_new() {
        let payload = status_update(&StatusUpdate {
            delivery_id: DeliveryId::new("DEL-001"),
            previous_status: DeliveryStatus::InTransit,
            new_status: DeliveryStatus::Delivered,
            description: "Items delivered and received at the store".to_string(),
        });

        let text = payload.as_text().expect("text payload");
        assert!(text.contains("Previous Status: IN_TRANSIT"));
        assert!(text.contains("New Status: DELIVERED"));
    }

    #[test]
    fn restock_plan_includes_pending_warning_and_total() {
        let plan = RestockPlan {
            recommendations: vec![RestockRecommendation {
                store_id: StoreId::new("12"),
                store_name: "Downtown Store".to_string(),
                sku: Sku::new("SKU1"),
                item_name: "Espresso Beans".to_string(),
                current_stock: 10,
                minimum_threshold: 20,
                recommended_qty: 8,
                unit: "bags".to_string(),
                supplier: "Coffee Co.".to_string(),
                estimated_cost: Decimal::new(10000, 2),
                pending_qty: 12,
            }],
            total_estimated_cost: Decimal::new(10000, 2),
        };

        let text = restock_plan(&plan);
        let text = text.as_text().expect("text payload");
        assert!(text.starts_with("📋 DELIVERY RECOMMENDATIONS:"));
        assert!(text.contains("Recommended Order: 8 bags"));
        assert!(text.contains("⚠️ Pending Delivery: 12 bags"));
        assert!(text.ends_with("💰 Total Estimated Cost: $100.00"));

        let empty = restock_plan(&RestockPlan::default());
        assert!(empty.as_text().expect("text payload").starts_with("🎉"));
    }

    #[test]
    fn errors_are_relayed_verbatim_as_text() {
        let payload = service_error(&ServiceError::StoreNotFound(StoreId::new("99")));
        assert_eq!(payload.as_text(), Some("Store 99 not found."));

        let json = serde_json::to_value(ResponsePayload::text("hello")).expect("serialize");
        assert_eq!(json["contentType"], "Text");
        assert_eq!(json["content"], "hello");
    }
}
