// Public API - what other modules can use
pub use handlers::router;
pub use random::{choose, FixedRandom, RandomSource, ThreadRandom};
pub use service::GeneratorService;
pub use strategies::{GeneratorError, SYMBOLS};

// Internal modules
mod handlers;
pub mod random;
mod service;
pub mod strategies;
pub mod types;
mod words;
