pub mod delivery;
pub mod inventory;
