use stockline_cards::render;
use stockline_core::{Sku, StoreId};

use crate::commands::{respond, CommandResult, Services};

pub async fn run(
    services: &Services,
    store: String,
    sku: String,
    delta: i64,
    reason: &str,
) -> CommandResult {
    let store_id = StoreId(store);
    let sku = Sku(sku);
    respond(
        services
            .inventory
            .adjust_stock(&store_id, &sku, delta, reason)
            .await
            .map(|adjustment| render::stock_adjustment(&adjustment)),
    )
}
