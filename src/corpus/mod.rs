// Working corpus: the recipes available for one session, with derived
// fields cached next to each record.

pub mod loader;
pub mod recipe;

pub use loader::{load_records, LoadOptions};
pub use recipe::{Recipe, RecipeRecord};

use crate::error::{Error, Result};
use crate::indexer::nutrition::{HealthRating, HealthThresholds};
use std::collections::HashMap;
use tracing::{info, warn};

/// Ordered, immutable set of recipes.
#[derive(Debug, Clone)]
pub struct Corpus {
    recipes: Vec<Recipe>,
    by_name: HashMap<String, usize>,
}

impl Corpus {
    pub fn new(records: Vec<RecipeRecord>, thresholds: &HealthThresholds) -> Self {
        let recipes: Vec<Recipe> = records
            .into_iter()
            .map(|record| Recipe::new(record, thresholds))
            .collect();

        // Names are assumed unique; on collision the first occurrence wins
        let mut by_name = HashMap::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            if by_name.contains_key(recipe.name()) {
                warn!("Duplicate recipe name {:?} at position {}", recipe.name(), position);
                continue;
            }
            by_name.insert(recipe.name().to_string(), position);
        }

        let healthy = recipes
            .iter()
            .filter(|r| r.health == HealthRating::HealthyChoice)
            .count();
        info!("Corpus ready: {} recipes ({} healthy)", recipes.len(), healthy);

        Self { recipes, by_name }
    }

    /// Look a recipe up by name
    pub fn find(&self, name: &str) -> Result<&Recipe> {
        self.by_name
            .get(name)
            .map(|&position| &self.recipes[position])
            .ok_or_else(|| Error::RecipeNotFound(name.to_string()))
    }

    pub fn get(&self, position: usize) -> Option<&Recipe> {
        self.recipes.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Normalized text of every recipe, in corpus order
    pub fn normalized_texts(&self) -> Vec<&str> {
        self.recipes
            .iter()
            .map(|r| r.normalized_text.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, description: &str) -> RecipeRecord {
        RecipeRecord {
            name: name.to_string(),
            description: description.to_string(),
            ingredients: "['water']".to_string(),
            tags: "['easy']".to_string(),
            nutrition: "[100.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]".to_string(),
            steps: "['boil']".to_string(),
            minutes: 5,
        }
    }

    #[test]
    fn test_find_by_name() {
        let corpus = Corpus::new(
            vec![record("tea", "hot tea"), record("soup", "warm soup")],
            &HealthThresholds::default(),
        );

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.find("soup").unwrap().record.description, "warm soup");
        assert!(matches!(
            corpus.find("pizza"),
            Err(Error::RecipeNotFound(name)) if name == "pizza"
        ));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let corpus = Corpus::new(
            vec![record("tea", "green tea"), record("tea", "black tea")],
            &HealthThresholds::default(),
        );

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.find("tea").unwrap().record.description, "green tea");
    }

    #[test]
    fn test_normalized_texts_follow_corpus_order() {
        let corpus = Corpus::new(
            vec![record("a", "First!"), record("b", "Second?")],
            &HealthThresholds::default(),
        );

        let texts = corpus.normalized_texts();
        assert!(texts[0].starts_with("first"));
        assert!(texts[1].starts_with("second"));
    }
}
