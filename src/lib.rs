pub mod api;
pub mod config;
pub mod mcp;
pub mod service;

pub use enrollment_core::{db, models};
