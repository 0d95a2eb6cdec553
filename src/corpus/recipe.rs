use crate::indexer::literal::parse_string_list;
use crate::indexer::normalize::normalize;
use crate::indexer::nutrition::{self, HealthRating, HealthThresholds, NutritionInfo};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A complete dataset row, as handed over by the loader.
///
/// List-valued fields keep their serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub tags: String,
    pub nutrition: String,
    pub steps: String,
    pub minutes: i64,
}

/// A recipe in the working corpus, with its derived fields computed once.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub record: RecipeRecord,
    /// `description ingredients tags`, raw
    pub combined_text: String,
    pub normalized_text: String,
    pub ingredient_list: Vec<String>,
    pub tag_list: Vec<String>,
    pub nutrition_info: Option<NutritionInfo>,
    pub health: HealthRating,
    /// `None` when the serialized step list could not be parsed
    pub step_list: Option<Vec<String>>,
}

impl Recipe {
    pub fn new(record: RecipeRecord, thresholds: &HealthThresholds) -> Self {
        let combined_text = format!(
            "{} {} {}",
            record.description, record.ingredients, record.tags
        );
        let normalized_text = normalize(&combined_text);

        let nutrition_info = nutrition::parse(&record.nutrition);
        if nutrition_info.is_none() {
            warn!("Unparseable nutrition for recipe {:?}", record.name);
        }
        let health = thresholds.classify(nutrition_info.as_ref());

        let step_list = parse_string_list(&record.steps);
        if step_list.is_none() {
            warn!("Unparseable steps for recipe {:?}", record.name);
        }

        Self {
            ingredient_list: parse_string_list(&record.ingredients).unwrap_or_default(),
            tag_list: parse_string_list(&record.tags).unwrap_or_default(),
            combined_text,
            normalized_text,
            nutrition_info,
            health,
            step_list,
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}
