// Retrieval building blocks: text normalization, literal parsing,
// nutrition/health classification, category inference and the TF-IDF index

pub mod category;
pub mod literal;
pub mod normalize;
pub mod nutrition;
pub mod vector;

// Re-exports
pub use category::CategoryClassifier;
pub use normalize::normalize;
pub use nutrition::{classify_health, HealthRating, HealthThresholds, NutritionInfo};
pub use vector::{SparseVector, VectorIndex};
