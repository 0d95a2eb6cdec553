use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Built-in category table.
///
/// Order matters: a query that hits keywords from several categories is
/// assigned the first one listed here.
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "dessert",
        &[
            "cookie", "cake", "brownie", "dessert", "sweets", "pie", "pastry", "ice cream",
            "pudding", "mousse", "tart", "sorbet", "cheesecake", "chocolate", "frosting",
        ],
    ),
    (
        "main_course",
        &[
            "chicken", "beef", "pasta", "stew", "curry", "casserole", "dinner", "soup",
            "lasagna", "meatloaf", "bake", "stir fry", "grilled", "roasted", "tacos", "burrito",
            "sandwich", "wrap", "spaghetti", "sauteed", "stewed",
        ],
    ),
    (
        "healthy",
        &[
            "healthy", "low calorie", "nutritious", "low fat", "high protein", "light",
            "low carb", "vegan", "vegetarian", "plant-based", "gluten-free", "organic",
            "whole grain", "fiber-rich", "sugar-free", "heart healthy",
        ],
    ),
    (
        "spicy",
        &["spicy", "hot", "chili", "cayenne", "pepper", "szechuan", "jalapeno"],
    ),
    (
        "comfort_food",
        &["comfort food", "cheesy", "creamy", "fried", "hearty", "buttery", "rich"],
    ),
    (
        "quick_meals",
        &["quick", "fast", "easy", "simple", "no-cook", "microwave", "15-minute"],
    ),
    (
        "protein_rich",
        &["protein", "muscle", "gains", "high protein", "meat", "lean"],
    ),
    (
        "breakfast",
        &["breakfast", "brunch", "pancake", "omelet", "smoothie", "cereal", "toast"],
    ),
    (
        "seafood",
        &["fish", "salmon", "shrimp", "tuna", "lobster", "scallop", "crab", "oysters"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    /// True if any keyword occurs as a substring of `text`
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

/// Ordered category → keywords table. Iteration order is the tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

/// On-disk form of a category table override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub version: u32,
    pub categories: Vec<Category>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, keywords)| Category {
                    name: (*name).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let table = Self { categories };
        table.validate()?;
        Ok(table)
    }

    /// Load a category table from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read category config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: CategoryConfig = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse category config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}. Expected version 1",
                config.version
            )));
        }

        Self::new(config.categories)
    }

    /// Validate the table
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config(
                "Category table must contain at least one category".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Category #{} has an empty name",
                    index + 1
                )));
            }

            if !seen.insert(category.name.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate category name: {}",
                    category.name
                )));
            }

            if category.keywords.is_empty() {
                return Err(Error::Config(format!(
                    "Category {} has no keywords",
                    category.name
                )));
            }

            // Matching runs against lowercased text, so uppercase keywords could never hit
            for keyword in &category.keywords {
                if keyword.trim().is_empty() || *keyword != keyword.to_lowercase() {
                    return Err(Error::Config(format!(
                        "Category {}: keyword {:?} must be non-empty and lowercase",
                        category.name, keyword
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_table_order() {
        let table = CategoryTable::default();
        let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "dessert",
                "main_course",
                "healthy",
                "spicy",
                "comfort_food",
                "quick_meals",
                "protein_rich",
                "breakfast",
                "seafood",
            ]
        );
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
version: 1
categories:
  - name: vegan
    keywords: [vegan, plant based, tofu]
  - name: dessert
    keywords:
      - cake
      - cookie
"#;

        let file = create_test_config(config_content);
        let table = CategoryTable::from_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().name, "vegan");
        assert!(table.get("dessert").unwrap().matches("a chocolate cake"));
        assert!(table.get("seafood").is_none());
    }

    #[test]
    fn test_reject_duplicate_names() {
        let config_content = r#"
version: 1
categories:
  - name: dessert
    keywords: [cake]
  - name: dessert
    keywords: [pie]
"#;

        let file = create_test_config(config_content);
        let result = CategoryTable::from_file(file.path());

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Duplicate category name"));
    }

    #[test]
    fn test_reject_bad_keywords_and_version() {
        let uppercase = create_test_config(
            "version: 1\ncategories:\n  - name: spicy\n    keywords: [Chili]\n",
        );
        assert!(CategoryTable::from_file(uppercase.path()).is_err());

        let empty = create_test_config("version: 1\ncategories:\n  - name: spicy\n    keywords: []\n");
        assert!(CategoryTable::from_file(empty.path()).is_err());

        let version = create_test_config("version: 2\ncategories:\n  - name: spicy\n    keywords: [hot]\n");
        let err = CategoryTable::from_file(version.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config version"));

        assert!(CategoryTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = CategoryTable::from_file("/nonexistent/categories.yaml");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
