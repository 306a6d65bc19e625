pub mod inventory_client;
pub mod memory_storage;
pub mod models;
pub mod notifications;
pub mod snapshot_repo;
