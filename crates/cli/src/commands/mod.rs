pub mod adjust;
pub mod deliveries;
pub mod inventory;
pub mod low_stock;
pub mod order;
pub mod recommend;
pub mod seed;
pub mod set_status;
pub mod tools;

use std::sync::Arc;

use stockline_cards::render::{self, ResponsePayload};
use stockline_core::config::AppConfig;
use stockline_core::{
    DeliveriesDoc, DeliveryService, ErrorKind, InventoryDoc, InventoryService, ServiceError,
};
use stockline_data::FileStore;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(exit_code: u8, output: impl Into<String>) -> Self {
        Self { exit_code, output: output.into() }
    }
}

/// File-backed services sharing one inventory store, so delivery
/// operations read the same document the inventory service writes.
pub struct Services {
    pub inventory: Arc<InventoryService>,
    pub delivery: Arc<DeliveryService>,
}

pub fn services(config: &AppConfig) -> Services {
    let inventory_store: Arc<FileStore<InventoryDoc>> =
        Arc::new(FileStore::new(&config.data.inventory_path));
    let deliveries_store: Arc<FileStore<DeliveriesDoc>> =
        Arc::new(FileStore::new(&config.data.deliveries_path));

    Services {
        inventory: Arc::new(InventoryService::new(inventory_store.clone())),
        delivery: Arc::new(DeliveryService::new(deliveries_store, inventory_store)),
    }
}

/// Text payloads print as-is; cards print as their wire JSON so the
/// output can be piped straight into a card previewer.
pub(crate) fn render_payload(payload: &ResponsePayload) -> String {
    match payload {
        ResponsePayload::Text(text) => text.clone(),
        ResponsePayload::AdaptiveCard(_) => serde_json::to_string_pretty(payload)
            .unwrap_or_else(|error| format!("failed to serialize card: {error}")),
    }
}

/// Empty results are informational, not failures: the message prints and
/// the command exits zero. Lookup and validation problems exit 2, storage
/// problems 4.
pub(crate) fn respond(result: Result<ResponsePayload, ServiceError>) -> CommandResult {
    match result {
        Ok(payload) => CommandResult::success(render_payload(&payload)),
        Err(error) => match error.kind() {
            ErrorKind::Empty => CommandResult::success(error.to_string()),
            ErrorKind::NotFound | ErrorKind::Validation => {
                CommandResult::failure(2, render_payload(&render::service_error(&error)))
            }
            ErrorKind::Storage => CommandResult::failure(4, error.to_string()),
        },
    }
}
