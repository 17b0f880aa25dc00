// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod cache;
pub mod config;
pub mod event;
pub mod fetch;
pub mod filter;
pub mod stats;
pub mod table;
