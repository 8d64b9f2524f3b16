use stockline_cards::render;
use stockline_core::DeliveryId;

use crate::commands::{respond, CommandResult, Services};

pub async fn run(services: &Services, delivery: String, status: &str) -> CommandResult {
    let delivery_id = DeliveryId(delivery);
    respond(
        services
            .delivery
            .update_status(&delivery_id, status)
            .await
            .map(|update| render::status_update(&update)),
    )
}
