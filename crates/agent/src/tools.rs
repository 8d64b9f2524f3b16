use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use stockline_cards::render;
use stockline_cards::ResponsePayload;
use stockline_core::{
    DeliveryId, DeliveryService, InventoryService, ServiceError, Sku, StoreId,
};

/// One callable operation exposed to the conversational front-end. Inputs
/// and outputs are JSON so the hosting framework can pass tool calls
/// through untyped.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub async fn dispatch(&self, name: &str, input: Value) -> Result<Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow!("unknown tool `{name}`"))?;
        debug!(event_name = "agent.tool_dispatch", tool = name, "dispatching tool call");
        tool.execute(input).await
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// User-facing service failures become Text payloads relayed verbatim;
/// storage faults stay tool errors for the host to handle.
fn reply(result: Result<ResponsePayload, ServiceError>) -> Result<Value> {
    let payload = match result {
        Ok(payload) => payload,
        Err(error) if error.is_user_relayable() => render::service_error(&error),
        Err(error) => return Err(error.into()),
    };
    serde_json::to_value(payload).context("serializing response payload")
}

fn parse_input<T>(input: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(input).context("invalid tool input")
}

pub struct CheckInventory {
    service: Arc<InventoryService>,
}

impl CheckInventory {
    pub fn new(service: Arc<InventoryService>) -> Self {
        Self { service }
    }
}

#[derive(Deserialize)]
struct CheckInventoryInput {
    store_id: String,
    #[serde(default)]
    sku: Option<String>,
}

#[async_trait]
impl Tool for CheckInventory {
    fn name(&self) -> &'static str {
        "check_inventory"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: CheckInventoryInput = parse_input(input)?;
        let store_id = StoreId::new(input.store_id);
        let sku = input.sku.map(Sku::new);
        let result = self.service.get_item(&store_id, sku.as_ref()).await;
        reply(result.map(|report| render::inventory_report(&report)))
    }
}

pub struct CheckLowStockAlerts {
    service: Arc<InventoryService>,
}

impl CheckLowStockAlerts {
    pub fn new(service: Arc<InventoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CheckLowStockAlerts {
    fn name(&self) -> &'static str {
        "check_low_stock_alerts"
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        let result = self.service.list_low_stock().await;
        reply(result.map(|alerts| render::low_stock_alerts(&alerts)))
    }
}

pub struct UpdateInventory {
    service: Arc<InventoryService>,
}

impl UpdateInventory {
    pub fn new(service: Arc<InventoryService>) -> Self {
        Self { service }
    }
}

#[derive(Deserialize)]
struct UpdateInventoryInput {
    store_id: String,
    sku: String,
    quantity_change: i64,
    reason: String,
}

#[async_trait]
impl Tool for UpdateInventory {
    fn name(&self) -> &'static str {
        "update_inventory"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: UpdateInventoryInput = parse_input(input)?;
        let result = self
            .service
            .adjust_stock(
                &StoreId::new(input.store_id),
                &Sku::new(input.sku),
                input.quantity_change,
                &input.reason,
            )
            .await;
        reply(result.map(|adjustment| render::stock_adjustment(&adjustment)))
    }
}

pub struct CheckDeliveries {
    service: Arc<DeliveryService>,
}

impl CheckDeliveries {
    pub fn new(service: Arc<DeliveryService>) -> Self {
        Self { service }
    }
}

#[derive(Deserialize)]
struct CheckDeliveriesInput {
    #[serde(default)]
    store_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl Tool for CheckDeliveries {
    fn name(&self) -> &'static str {
        "check_deliveries"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: CheckDeliveriesInput = parse_input(input)?;
        let store_id = input.store_id.map(StoreId::new);
        let result = self
            .service
            .list_deliveries(store_id.as_ref(), input.status.as_deref())
            .await;
        reply(result.map(|views| render::delivery_schedule(&views)))
    }
}

pub struct PlaceDeliveryOrder {
    service: Arc<DeliveryService>,
}

impl PlaceDeliveryOrder {
    pub fn new(service: Arc<DeliveryService>) -> Self {
        Self { service }
    }
}

#[derive(Deserialize)]
struct PlaceDeliveryOrderInput {
    store_id: String,
    sku: String,
    quantity: u32,
    #[serde(default)]
    urgent: bool,
}

#[async_trait]
impl Tool for PlaceDeliveryOrder {
    fn name(&self) -> &'static str {
        "place_delivery_order"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: PlaceDeliveryOrderInput = parse_input(input)?;
        let result = self
            .service
            .place_order(
                &StoreId::new(input.store_id),
                &Sku::new(input.sku),
                input.quantity,
                input.urgent,
            )
            .await;
        reply(result.map(|confirmation| render::order_confirmation(&confirmation)))
    }
}

pub struct UpdateDeliveryStatus {
    service: Arc<DeliveryService>,
}

impl UpdateDeliveryStatus {
    pub fn new(service: Arc<DeliveryService>) -> Self {
        Self { service }
    }
}

#[derive(Deserialize)]
struct UpdateDeliveryStatusInput {
    delivery_id: String,
    new_status: String,
}

#[async_trait]
impl Tool for UpdateDeliveryStatus {
    fn name(&self) -> &'static str {
        "update_delivery_status"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: UpdateDeliveryStatusInput = parse_input(input)?;
        let result = self
            .service
            .update_status(&DeliveryId::new(input.delivery_id), &input.new_status)
            .await;
        reply(result.map(|update| render::status_update(&update)))
    }
}

pub struct GetDeliveryRecommendations {
    service: Arc<DeliveryService>,
}

impl GetDeliveryRecommendations {
    pub fn new(service: Arc<DeliveryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetDeliveryRecommendations {
    fn name(&self) -> &'static str {
        "get_delivery_recommendations"
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        let result = self.service.recommend_restocks().await;
        reply(result.map(|plan| render::restock_plan(&plan)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use stockline_core::{
        DeliveriesDoc, DeliveryService, InventoryDoc, InventoryService, MemoryStore,
    };
    use stockline_data::{demo_deliveries, demo_inventory};

    use crate::build_registry;

    fn registry() -> crate::ToolRegistry {
        let inventory: Arc<MemoryStore<InventoryDoc>> =
            Arc::new(MemoryStore::with(demo_inventory()));
        let deliveries: Arc<MemoryStore<DeliveriesDoc>> =
            Arc::new(MemoryStore::with(demo_deliveries()));
        build_registry(
            Arc::new(InventoryService::new(inventory.clone())),
            Arc::new(DeliveryService::new(deliveries, inventory)),
        )
    }

    #[test]
    fn registry_exposes_all_seven_operations() {
        let registry = registry();
        assert_eq!(registry.len(), 7);
        let mut names = registry.names();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "check_deliveries",
                "check_inventory",
                "check_low_stock_alerts",
                "get_delivery_recommendations",
                "place_delivery_order",
                "update_delivery_status",
                "update_inventory",
            ]
        );
    }

    #[tokio::test]
    async fn check_inventory_returns_a_text_payload() {
        let registry = registry();
        let output = registry
            .dispatch("check_inventory", json!({"store_id": "12", "sku": "SKU1001"}))
            .await
            .expect("dispatch");

        assert_eq!(output["contentType"], "Text");
        let text = output["content"].as_str().expect("text content");
        assert!(text.contains("Espresso Beans"));
        assert!(text.contains("Status: LOW STOCK"));
    }

    #[tokio::test]
    async fn place_delivery_order_returns_a_card_payload() {
        let registry = registry();
        let output = registry
            .dispatch(
                "place_delivery_order",
                json!({"store_id": "12", "sku": "SKU1002", "quantity": 20, "urgent": true}),
            )
            .await
            .expect("dispatch");

        assert_eq!(output["contentType"], "AdaptiveCard");
        assert_eq!(output["content"]["type"], "AdaptiveCard");
    }

    #[tokio::test]
    async fn not_found_errors_are_relayed_as_text() {
        let registry = registry();
        let output = registry
            .dispatch("check_inventory", json!({"store_id": "99"}))
            .await
            .expect("relayed, not failed");

        assert_eq!(output["contentType"], "Text");
        assert_eq!(output["content"], "Store 99 not found.");
    }

    #[tokio::test]
    async fn malformed_input_and_unknown_tool_are_tool_failures() {
        let registry = registry();

        let bad_input = registry
            .dispatch("update_inventory", json!({"store_id": "12"}))
            .await;
        assert!(bad_input.is_err());

        let unknown = registry.dispatch("time_travel", Value::Null).await;
        assert!(unknown.is_err());
    }
}
