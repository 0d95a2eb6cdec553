pub mod engine;

pub use engine::{
    Recommendation, RecommendationEngine, RecommendationResult, RecommendOptions,
};
