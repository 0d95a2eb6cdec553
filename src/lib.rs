pub mod config;
pub mod error;

// Retrieval core
pub mod corpus;
pub mod indexer;
pub mod recommend;

// Outer surfaces
pub mod api;
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use recommend::{RecommendationEngine, RecommendationResult};
