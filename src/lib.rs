pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;
pub mod types;
