use stockline_cards::render;

use crate::commands::{respond, CommandResult, Services};

pub async fn run(services: &Services) -> CommandResult {
    respond(
        services
            .inventory
            .list_low_stock()
            .await
            .map(|alerts| render::low_stock_alerts(&alerts)),
    )
}
