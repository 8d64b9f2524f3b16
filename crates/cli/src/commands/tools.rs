use crate::commands::{CommandResult, Services};

/// Lists the tool names the conversational front-end can dispatch, for
/// checking a deployment's wiring against the assistant manifest.
pub fn run(services: &Services) -> CommandResult {
    let registry =
        stockline_agent::build_registry(services.inventory.clone(), services.delivery.clone());
    let mut names = registry.names();
    names.sort_unstable();
    CommandResult::success(names.join("\n"))
}
