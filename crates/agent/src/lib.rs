pub mod tools;

use std::sync::Arc;

use stockline_core::{DeliveryService, InventoryService};

pub use tools::{Tool, ToolRegistry};

/// Registry wired with every inventory and delivery tool the
/// conversational front-end can invoke.
pub fn build_registry(
    inventory: Arc<InventoryService>,
    delivery: Arc<DeliveryService>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(tools::CheckInventory::new(inventory.clone()));
    registry.register(tools::CheckLowStockAlerts::new(inventory.clone()));
    registry.register(tools::UpdateInventory::new(inventory));
    registry.register(tools::CheckDeliveries::new(delivery.clone()));
    registry.register(tools::PlaceDeliveryOrder::new(delivery.clone()));
    registry.register(tools::UpdateDeliveryStatus::new(delivery.clone()));
    registry.register(tools::GetDeliveryRecommendations::new(delivery));
    registry
}
