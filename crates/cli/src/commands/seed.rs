use stockline_core::config::AppConfig;
use stockline_core::{DeliveriesDoc, DocumentStore, InventoryDoc};
use stockline_data::{fixtures, FileStore};

use crate::commands::CommandResult;

/// Writes the demo fixture documents, creating the data directory if
/// needed. Overwrites whatever is already there.
pub async fn run(config: &AppConfig) -> CommandResult {
    for path in [&config.data.inventory_path, &config.data.deliveries_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(error) = tokio::fs::create_dir_all(parent).await {
                    return CommandResult::failure(
                        4,
                        format!("could not create data directory `{}`: {error}", parent.display()),
                    );
                }
            }
        }
    }

    let inventory = fixtures::demo_inventory();
    let deliveries = fixtures::demo_deliveries();

    let inventory_store = FileStore::<InventoryDoc>::new(&config.data.inventory_path);
    if let Err(error) = inventory_store.save(&inventory).await {
        return CommandResult::failure(4, format!("storage failure: {error}"));
    }

    let deliveries_store = FileStore::<DeliveriesDoc>::new(&config.data.deliveries_path);
    if let Err(error) = deliveries_store.save(&deliveries).await {
        return CommandResult::failure(4, format!("storage failure: {error}"));
    }

    CommandResult::success(format!(
        "Seeded {} stores and {} deliveries into {} and {}.",
        inventory.stores.len(),
        deliveries.deliveries.len(),
        config.data.inventory_path.display(),
        config.data.deliveries_path.display(),
    ))
}
