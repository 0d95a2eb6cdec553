use crate::corpus::Recipe;
use crate::indexer::{HealthRating, NutritionInfo};
use serde::{Deserialize, Serialize};

/// Recommendation request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub q: String,
    /// Falls back to the configured default when absent
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub query: String,
    pub category: Option<String>,
    pub results: Vec<RecommendationCard>,
}

/// One ranked recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationCard {
    pub rank: usize,
    pub name: String,
    /// Similarity percentage, 0 to 100
    pub score: f64,
    pub health: HealthRating,
}

/// Full recipe details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
    pub minutes: i64,
    pub health: HealthRating,
    pub nutrition: Option<NutritionInfo>,
    /// `None` when the stored steps could not be parsed
    pub steps: Option<Vec<String>>,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.record.name.clone(),
            description: recipe.record.description.clone(),
            ingredients: recipe.ingredient_list.clone(),
            tags: recipe.tag_list.clone(),
            minutes: recipe.record.minutes,
            health: recipe.health,
            nutrition: recipe.nutrition_info,
            steps: recipe.step_list.clone(),
        }
    }
}

/// Category table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCard {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Corpus statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub recipes: usize,
    pub vocabulary: usize,
    pub healthy: usize,
    pub categories: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub recipes: usize,
}
