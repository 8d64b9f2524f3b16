use stockline_cards::render;
use stockline_core::StoreId;

use crate::commands::{respond, CommandResult, Services};

pub async fn run(
    services: &Services,
    store: Option<String>,
    status: Option<String>,
) -> CommandResult {
    let store_id = store.map(StoreId);
    respond(
        services
            .delivery
            .list_deliveries(store_id.as_ref(), status.as_deref())
            .await
            .map(|views| render::delivery_schedule(&views)),
    )
}
