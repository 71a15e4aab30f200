// Public API - what other modules can use
pub use handlers::router;
pub use models::{FavoriteMode, HistoryRecord, HistorySummary, Preference};
pub use registry::TakenRegistry;
pub use service::HistoryService;

// Internal modules
mod handlers;
pub mod models;
mod registry;
pub mod repository;
mod service;
pub mod types;
