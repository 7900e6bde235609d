pub mod catalog;
pub mod replica;
