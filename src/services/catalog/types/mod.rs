pub mod catalog_error;
pub mod models;
