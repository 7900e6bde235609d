pub mod attachment_store;
pub mod catalog_service;
pub mod ordering;
pub mod stop_registry;
pub mod types;
