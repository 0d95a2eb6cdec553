use crate::indexer::literal::parse_number_list;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Minimum number of values in a serialized nutrition tuple
pub const NUTRITION_FIELDS: usize = 7;

/// The subset of a recipe's nutrition tuple used for health classification.
///
/// Positions 0, 1, 4, 5 and 6 of the serialized tuple map to the fields below.
/// Fields absent from a deserialized record fall back to unfavorable values
/// so an incomplete record can never look healthy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(rename = "Calories", default = "unfavorable_calories")]
    pub calories: f64,
    #[serde(rename = "Total Fat", default = "unfavorable_fat")]
    pub total_fat: f64,
    #[serde(rename = "Sugar", default = "unfavorable_sugar")]
    pub sugar: f64,
    #[serde(rename = "Protein", default = "unfavorable_protein")]
    pub protein: f64,
    #[serde(rename = "Sodium", default = "unfavorable_sodium")]
    pub sodium: f64,
}

fn unfavorable_calories() -> f64 {
    1000.0
}

fn unfavorable_fat() -> f64 {
    100.0
}

fn unfavorable_sugar() -> f64 {
    100.0
}

fn unfavorable_protein() -> f64 {
    0.0
}

fn unfavorable_sodium() -> f64 {
    1000.0
}

impl Default for NutritionInfo {
    fn default() -> Self {
        Self {
            calories: unfavorable_calories(),
            total_fat: unfavorable_fat(),
            sugar: unfavorable_sugar(),
            protein: unfavorable_protein(),
            sodium: unfavorable_sodium(),
        }
    }
}

impl NutritionInfo {
    /// Named fields in display order
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("Calories", self.calories),
            ("Total Fat", self.total_fat),
            ("Sugar", self.sugar),
            ("Protein", self.protein),
            ("Sodium", self.sodium),
        ]
    }
}

/// Parse a serialized nutrition tuple.
///
/// Parsing is all-or-nothing: malformed input or fewer than
/// [`NUTRITION_FIELDS`] values yields `None`.
pub fn parse(raw: &str) -> Option<NutritionInfo> {
    let values = parse_number_list(raw)?;
    if values.len() < NUTRITION_FIELDS {
        debug!(
            "Nutrition tuple too short: {} values (need {})",
            values.len(),
            NUTRITION_FIELDS
        );
        return None;
    }

    Some(NutritionInfo {
        calories: values[0],
        total_fat: values[1],
        sugar: values[4],
        protein: values[5],
        sodium: values[6],
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    HealthyChoice,
    StandardMeal,
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthRating::HealthyChoice => write!(f, "Healthy Choice"),
            HealthRating::StandardMeal => write!(f, "Standard Meal"),
        }
    }
}

/// Limits a recipe has to stay within to be rated [`HealthRating::HealthyChoice`].
///
/// All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub max_calories: f64,
    pub max_sugar: f64,
    pub min_protein: f64,
    pub max_fat: f64,
    pub max_sodium: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            max_calories: 500.0,
            max_sugar: 10.0,
            min_protein: 15.0,
            max_fat: 20.0,
            max_sodium: 600.0,
        }
    }
}

impl HealthThresholds {
    pub fn classify(&self, info: Option<&NutritionInfo>) -> HealthRating {
        let Some(info) = info else {
            return HealthRating::StandardMeal;
        };

        if info.calories < self.max_calories
            && info.sugar < self.max_sugar
            && info.protein > self.min_protein
            && info.total_fat < self.max_fat
            && info.sodium < self.max_sodium
        {
            HealthRating::HealthyChoice
        } else {
            HealthRating::StandardMeal
        }
    }
}

/// Classify with the default thresholds
pub fn classify_health(info: Option<&NutritionInfo>) -> HealthRating {
    HealthThresholds::default().classify(info)
}
