use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*, indexer::HealthRating, recommend::RecommendationEngine, Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub settings: crate::config::Settings,
}

/// GET /api/recommend - Recommend recipes for a free-text query
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>> {
    debug!("Recommend request: {:?}", params);

    let top_n = params
        .top_n
        .unwrap_or(state.settings.recommend.default_top_n);
    if top_n == 0 {
        return Err(Error::Validation("top_n must be positive".to_string()));
    }
    let top_n = top_n.min(state.settings.recommend.max_top_n);

    let result = state.engine.recommend(&params.q, top_n)?;

    let results = result
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| RecommendationCard {
            rank: i + 1,
            name: item.name,
            score: item.score,
            health: item.health,
        })
        .collect();

    Ok(Json(RecommendResponse {
        query: params.q,
        category: result.category,
        results,
    }))
}

/// GET /api/recipes/:name - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", name);

    let recipe = state.engine.details(&name)?;
    Ok(Json(RecipeDetail::from(recipe)))
}

/// GET /api/categories - List categories in matching order
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryCard>>> {
    let categories = state
        .engine
        .categories()
        .iter()
        .map(|c| CategoryCard {
            name: c.name.clone(),
            keywords: c.keywords.clone(),
        })
        .collect();

    Ok(Json(categories))
}

/// GET /api/stats - Get corpus statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let corpus = state.engine.corpus();
    let healthy = corpus
        .iter()
        .filter(|r| r.health == HealthRating::HealthyChoice)
        .count();

    Ok(Json(Stats {
        recipes: corpus.len(),
        vocabulary: state.engine.index().vocabulary_len(),
        healthy,
        categories: state.engine.categories().len(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // The engine only exists once the index is built
    let recipes = state.engine.corpus().len();

    Ok(Json(ReadinessResponse {
        ready: recipes > 0,
        recipes,
    }))
}
