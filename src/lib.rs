// Library crate for the username generation service
// This file exposes the public API for integration tests

pub mod config;
pub mod generator;
pub mod history;
pub mod shared;
pub mod validation;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use generator::{FixedRandom, RandomSource, ThreadRandom};
pub use history::repository::{HistoryRepository, InMemoryHistoryRepository};
pub use shared::{AppError, AppState};
pub use validation::Blacklist;

/// Every endpoint of the service, wired to `state`
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(generator::router())
        .merge(validation::router())
        .merge(history::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
