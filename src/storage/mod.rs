// Storage module for persistent data
pub mod cache_store;

pub use cache_store::*;
