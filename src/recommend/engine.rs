use crate::config::categories::CategoryTable;
use crate::corpus::{Corpus, Recipe};
use crate::error::{Error, Result};
use crate::indexer::{normalize, CategoryClassifier, HealthRating, VectorIndex};
use serde::Serialize;
use tracing::{debug, info};

/// Tuning for the candidate walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Only the `top_n * candidate_multiplier` best-scoring recipes are
    /// considered for the category filter
    pub candidate_multiplier: usize,
    /// Walk the whole ranking instead of the bounded candidate pool
    pub exhaustive: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            candidate_multiplier: 2,
            exhaustive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Position of the recipe in the corpus
    pub position: usize,
    pub name: String,
    /// Cosine similarity as a percentage, two decimals
    pub score: f64,
    pub health: HealthRating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Category inferred from the query, if any
    pub category: Option<String>,
    pub items: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Query-time entry point. Owns the corpus and the index built over it;
/// both are read-only after construction, so one engine can serve
/// concurrent queries behind an `Arc`.
#[derive(Debug)]
pub struct RecommendationEngine {
    corpus: Corpus,
    index: VectorIndex,
    classifier: CategoryClassifier,
    options: RecommendOptions,
}

impl RecommendationEngine {
    /// Build the vector index over `corpus`.
    ///
    /// Fails with [`Error::InvalidCorpus`] if the corpus is empty.
    pub fn new(corpus: Corpus, categories: CategoryTable, options: RecommendOptions) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::InvalidCorpus("corpus contains no recipes".to_string()));
        }

        let index = VectorIndex::build(&corpus.normalized_texts())?;
        if index.len() != corpus.len() {
            return Err(Error::InvalidCorpus(format!(
                "index holds {} documents for {} recipes",
                index.len(),
                corpus.len()
            )));
        }

        info!(
            "Recommendation engine ready: {} recipes, {} categories, candidate pool {}",
            corpus.len(),
            categories.len(),
            if options.exhaustive {
                "exhaustive".to_string()
            } else {
                format!("{}x top_n", options.candidate_multiplier)
            }
        );

        Ok(Self {
            corpus,
            index,
            classifier: CategoryClassifier::new(categories),
            options,
        })
    }

    /// Rank recipes against `query`, keep those matching the inferred
    /// category, and return at most `top_n` of them by descending score.
    ///
    /// An empty result means nothing qualified.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<RecommendationResult> {
        if top_n == 0 {
            return Err(Error::Validation("top_n must be positive".to_string()));
        }

        let category = self.classifier.classify(query);
        let query_vector = self.index.vectorize(&normalize(query));
        let scores = self.index.score(&query_vector);

        let pool = if self.options.exhaustive {
            scores.len()
        } else {
            top_n.saturating_mul(self.options.candidate_multiplier.max(1))
        };

        debug!(
            "Query {:?}: category={:?}, pool={}",
            query,
            category.map(|c| c.name.as_str()),
            pool
        );

        let items: Vec<Recommendation> = rank(&scores)
            .into_iter()
            .take(pool)
            .filter_map(|position| self.corpus.get(position).map(|recipe| (position, recipe)))
            .filter(|(_, recipe)| category.map_or(true, |c| c.matches(&recipe.normalized_text)))
            .take(top_n)
            .map(|(position, recipe)| Recommendation {
                position,
                name: recipe.name().to_string(),
                score: to_percent(scores[position]),
                health: recipe.health,
            })
            .collect();

        debug!("Query {:?}: {} recommendations", query, items.len());

        Ok(RecommendationResult {
            category: category.map(|c| c.name.clone()),
            items,
        })
    }

    /// Look a recipe up by name
    pub fn details(&self, name: &str) -> Result<&Recipe> {
        self.corpus.find(name)
    }

    /// Resolve a 1-based pick from a result list
    pub fn select(&self, result: &RecommendationResult, choice: usize) -> Result<&Recipe> {
        let item = choice
            .checked_sub(1)
            .and_then(|index| result.items.get(index))
            .ok_or(Error::InvalidSelection {
                index: choice,
                available: result.items.len(),
            })?;

        self.corpus
            .get(item.position)
            .ok_or_else(|| Error::RecipeNotFound(item.name.clone()))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn categories(&self) -> &CategoryTable {
        self.classifier.table()
    }

    pub fn options(&self) -> RecommendOptions {
        self.options
    }
}

/// Positions ordered by descending score; ties keep corpus order
fn rank(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order
}

fn to_percent(score: f64) -> f64 {
    ((score * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RecipeRecord;
    use crate::indexer::HealthThresholds;

    fn record(name: &str, description: &str, tags: &str) -> RecipeRecord {
        RecipeRecord {
            name: name.to_string(),
            description: description.to_string(),
            ingredients: "['water']".to_string(),
            tags: tags.to_string(),
            nutrition: "[100.0, 1.0, 2.0, 3.0, 4.0, 20.0, 6.0]".to_string(),
            steps: "['cook']".to_string(),
            minutes: 10,
        }
    }

    fn engine(records: Vec<RecipeRecord>, options: RecommendOptions) -> RecommendationEngine {
        let corpus = Corpus::new(records, &HealthThresholds::default());
        RecommendationEngine::new(corpus, CategoryTable::default(), options).unwrap()
    }

    fn garlic_corpus() -> Vec<RecipeRecord> {
        vec![
            record("loaf", "garlic bread loaf", "['bread']"),
            record("rolls", "garlic bread rolls", "['bread']"),
            record("knots", "garlic bread knots", "['bread']"),
            record("noodles", "chili noodles", "['noodles']"),
        ]
    }

    #[test]
    fn test_empty_corpus_fails_at_build() {
        let corpus = Corpus::new(Vec::new(), &HealthThresholds::default());
        let result = RecommendationEngine::new(
            corpus,
            CategoryTable::default(),
            RecommendOptions::default(),
        );
        assert!(matches!(result, Err(Error::InvalidCorpus(_))));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let engine = engine(garlic_corpus(), RecommendOptions::default());
        assert!(matches!(
            engine.recommend("garlic", 0),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_ties_break_by_corpus_position() {
        let engine = engine(garlic_corpus(), RecommendOptions::default());
        let result = engine.recommend("garlic bread", 3).unwrap();

        assert_eq!(result.category, None);
        let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["loaf", "rolls", "knots"]);
        assert_eq!(result.items[0].score, result.items[1].score);
    }

    #[test]
    fn test_bounded_pool_returns_partial_results() {
        // Only "noodles" is spicy, and it ranks below the 2 * top_n pool
        let bounded = engine(garlic_corpus(), RecommendOptions::default());
        let result = bounded.recommend("spicy garlic bread", 1).unwrap();
        assert_eq!(result.category.as_deref(), Some("spicy"));
        assert!(result.is_empty());

        let exhaustive = engine(
            garlic_corpus(),
            RecommendOptions {
                exhaustive: true,
                ..RecommendOptions::default()
            },
        );
        let result = exhaustive.recommend("spicy garlic bread", 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].name, "noodles");
        assert_eq!(result.items[0].score, 0.0);
    }

    #[test]
    fn test_select() {
        let engine = engine(garlic_corpus(), RecommendOptions::default());
        let result = engine.recommend("garlic bread rolls", 2).unwrap();

        assert_eq!(engine.select(&result, 1).unwrap().name(), "rolls");
        assert!(matches!(
            engine.select(&result, 0),
            Err(Error::InvalidSelection { index: 0, available: 2 })
        ));
        assert!(matches!(
            engine.select(&result, 3),
            Err(Error::InvalidSelection { index: 3, available: 2 })
        ));
    }

    #[test]
    fn test_details() {
        let engine = engine(garlic_corpus(), RecommendOptions::default());
        assert_eq!(engine.details("knots").unwrap().record.minutes, 10);
        assert!(matches!(
            engine.details("focaccia"),
            Err(Error::RecipeNotFound(_))
        ));
    }

    #[test]
    fn test_rank_and_percent() {
        assert_eq!(rank(&[0.1, 0.5, 0.1, 0.9]), vec![3, 1, 0, 2]);
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
    }
}
