pub mod file_store;
pub mod fixtures;

pub use file_store::FileStore;
pub use fixtures::{demo_deliveries, demo_inventory, status_descriptions};
