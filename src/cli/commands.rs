use crate::config::categories::CategoryTable;
use crate::config::Settings;
use crate::corpus::{load_records, Corpus, LoadOptions, Recipe};
use crate::recommend::{RecommendationEngine, RecommendationResult};
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::info;

/// Load the dataset and build the engine described by `settings`
pub fn load_engine(settings: &Settings) -> Result<RecommendationEngine> {
    let categories = match &settings.recommend.category_config_path {
        Some(path) => {
            info!("Loading category table from {}", path.display());
            CategoryTable::from_file(path)?
        }
        None => CategoryTable::default(),
    };

    let options = LoadOptions {
        sample_size: settings.dataset.sample_size,
        seed: settings.dataset.sample_seed,
    };
    let records = load_records(&settings.dataset.path, &options)?;
    let corpus = Corpus::new(records, &settings.health);

    RecommendationEngine::new(corpus, categories, settings.recommend.options())
}

/// Print recommendations for a single query
pub fn recommend<W: Write>(
    out: &mut W,
    engine: &RecommendationEngine,
    query: &str,
    top_n: usize,
) -> Result<()> {
    let result = engine.recommend(query, top_n)?;
    print_recommendations(out, &result)
}

/// Print the details of a named recipe
pub fn show<W: Write>(out: &mut W, engine: &RecommendationEngine, name: &str) -> Result<()> {
    let recipe = engine.details(name)?;
    print_details(out, recipe)
}

/// Print the category table in matching order
pub fn categories<W: Write>(out: &mut W, table: &CategoryTable) -> Result<()> {
    for (i, category) in table.iter().enumerate() {
        writeln!(out, "{}. {}: {}", i + 1, category.name, category.keywords.join(", "))?;
    }
    Ok(())
}

pub fn print_recommendations<W: Write>(out: &mut W, result: &RecommendationResult) -> Result<()> {
    if result.is_empty() {
        writeln!(out, "No matching recipes found. Try a different description.")?;
        return Ok(());
    }

    if let Some(category) = &result.category {
        writeln!(out, "Category: {category}")?;
    }
    writeln!(out, "Top Recipe Recommendations:")?;
    for (i, item) in result.items.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({}% match) - {}",
            i + 1,
            item.name,
            item.score,
            item.health
        )?;
    }

    Ok(())
}

pub fn print_details<W: Write>(out: &mut W, recipe: &Recipe) -> Result<()> {
    let record = &recipe.record;

    writeln!(out, "\n{}", record.name)?;
    writeln!(out, "Description: {}", record.description)?;
    if recipe.ingredient_list.is_empty() {
        writeln!(out, "Ingredients: {}", record.ingredients)?;
    } else {
        writeln!(out, "Ingredients: {}", recipe.ingredient_list.join(", "))?;
    }
    writeln!(out, "Cooking Time: {} minutes", record.minutes)?;
    writeln!(out, "Health Classification: {}", recipe.health)?;

    if let Some(nutrition) = &recipe.nutrition_info {
        writeln!(out, "\nNutritional Info:")?;
        for (label, value) in nutrition.fields() {
            writeln!(out, "  - {label}: {value}")?;
        }
    }

    writeln!(out, "\nInstructions:")?;
    match &recipe.step_list {
        Some(steps) => {
            for (i, step) in steps.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, step)?;
            }
        }
        None => writeln!(out, "  Unable to display instructions.")?,
    }

    Ok(())
}

/// Read one trimmed, lowercased line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "\n{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Interactive session: ask for a description, list recommendations, then
/// let the user open recipes by number until they ask for a new search or quit.
pub fn interactive<R: BufRead, W: Write>(
    engine: &RecommendationEngine,
    input: &mut R,
    out: &mut W,
    top_n: usize,
) -> Result<()> {
    loop {
        let Some(query) = prompt(
            input,
            out,
            "Enter a description of what you want to cook (or type 'exit' to quit): ",
        )?
        else {
            return Ok(());
        };

        if query == "exit" {
            writeln!(out, "\nGoodbye! Happy cooking!")?;
            return Ok(());
        }

        let result = engine.recommend(&query, top_n)?;
        writeln!(out)?;
        print_recommendations(out, &result)?;
        if result.is_empty() {
            continue;
        }

        loop {
            let Some(choice) = prompt(
                input,
                out,
                "Enter a number to see details, 'new' for new recommendations, or 'exit': ",
            )?
            else {
                return Ok(());
            };

            match choice.as_str() {
                "exit" => return Ok(()),
                "new" => break,
                digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                    // Numbers too large for usize are out of range anyway
                    let index = digits.parse().unwrap_or(usize::MAX);
                    match engine.select(&result, index) {
                        Ok(recipe) => print_details(out, recipe)?,
                        Err(Error::InvalidSelection { .. }) => writeln!(out, "\nInvalid selection.")?,
                        Err(e) => return Err(e),
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RecipeRecord;
    use crate::indexer::HealthThresholds;
    use crate::recommend::RecommendOptions;
    use std::io::Cursor;

    fn engine() -> RecommendationEngine {
        let records = vec![
            RecipeRecord {
                name: "salmon bowl".to_string(),
                description: "seared salmon over rice".to_string(),
                ingredients: "['salmon', 'rice', 'scallions']".to_string(),
                tags: "['seafood', 'dinner']".to_string(),
                nutrition: "[420.0, 15.0, 0.0, 0.0, 4.0, 35.0, 500.0]".to_string(),
                steps: "['sear the salmon', 'serve over rice']".to_string(),
                minutes: 20,
            },
            RecipeRecord {
                name: "fudge".to_string(),
                description: "dense chocolate fudge".to_string(),
                ingredients: "['chocolate', 'condensed milk']".to_string(),
                tags: "['dessert']".to_string(),
                nutrition: "[900.0, 40.0, 0.0, 0.0, 80.0, 5.0, 100.0]".to_string(),
                steps: "not a list".to_string(),
                minutes: 15,
            },
        ];
        let corpus = Corpus::new(records, &HealthThresholds::default());
        RecommendationEngine::new(corpus, CategoryTable::default(), RecommendOptions::default())
            .unwrap()
    }

    fn run_session(script: &str) -> String {
        let engine = engine();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        interactive(&engine, &mut input, &mut out, 5).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_recommend_output() {
        let engine = engine();
        let mut out = Vec::new();
        recommend(&mut out, &engine, "salmon with rice", 5).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Category: seafood"));
        assert!(text.contains("1. salmon bowl ("));
        assert!(text.contains("% match) - Healthy Choice"));
        assert!(!text.contains("fudge"));
    }

    #[test]
    fn test_show_output() {
        let engine = engine();
        let mut out = Vec::new();
        show(&mut out, &engine, "salmon bowl").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Ingredients: salmon, rice, scallions"));
        assert!(text.contains("Cooking Time: 20 minutes"));
        assert!(text.contains("  - Protein: 35"));
        assert!(text.contains("  2. serve over rice"));

        let mut out = Vec::new();
        show(&mut out, &engine, "fudge").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Unable to display instructions."));
        assert!(text.contains("Health Classification: Standard Meal"));

        let mut out = Vec::new();
        assert!(matches!(
            show(&mut out, &engine, "pizza"),
            Err(Error::RecipeNotFound(_))
        ));
    }

    #[test]
    fn test_interactive_session() {
        let text = run_session("Chocolate please\n1\n7\nnew\nexit\n");

        assert!(text.contains("1. fudge ("));
        assert!(text.contains("Description: dense chocolate fudge"));
        assert!(text.contains("Invalid selection."));
        assert!(text.contains("Goodbye! Happy cooking!"));
    }

    #[test]
    fn test_interactive_no_matches_and_eof() {
        let text = run_session("fried shrimp\n");

        assert!(text.contains("No matching recipes found"));
        assert!(!text.contains("Goodbye"));
    }

    #[test]
    fn test_categories_output() {
        let mut out = Vec::new();
        categories(&mut out, &CategoryTable::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("1. dessert: cookie, cake"));
        assert!(text.contains("9. seafood: fish"));
    }
}
