use stockline_cards::render;

use crate::commands::{respond, CommandResult, Services};

pub async fn run(services: &Services) -> CommandResult {
    respond(
        services
            .delivery
            .recommend_restocks()
            .await
            .map(|plan| render::restock_plan(&plan)),
    )
}
