use stockline_cards::render;
use stockline_core::{Sku, StoreId};

use crate::commands::{respond, CommandResult, Services};

pub async fn run(services: &Services, store: String, sku: Option<String>) -> CommandResult {
    let store_id = StoreId(store);
    let sku = sku.map(Sku);
    respond(
        services
            .inventory
            .get_item(&store_id, sku.as_ref())
            .await
            .map(|report| render::inventory_report(&report)),
    )
}
