// Public API - what other modules can use
pub use blacklist::{Blacklist, BlacklistMatch, DEFAULT_BLACKLIST};
pub use handlers::router;
pub use service::ValidationService;

// Internal modules
mod blacklist;
mod handlers;
pub mod rules;
mod service;
pub mod types;
