use stockline_cards::render;
use stockline_core::{Sku, StoreId};

use crate::commands::{respond, CommandResult, Services};

pub async fn run(
    services: &Services,
    store: String,
    sku: String,
    quantity: u32,
    urgent: bool,
) -> CommandResult {
    let store_id = StoreId(store);
    let sku = Sku(sku);
    respond(
        services
            .delivery
            .place_order(&store_id, &sku, quantity, urgent)
            .await
            .map(|confirmation| render::order_confirmation(&confirmation)),
    )
}
