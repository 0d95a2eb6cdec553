use crate::config::categories::{Category, CategoryTable};

/// Maps free text to a category by keyword membership.
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    table: CategoryTable,
}

impl CategoryClassifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// Return the first category, in table order, with a keyword contained in
    /// the lowercased `text`. `None` means no category filter applies.
    pub fn classify(&self, text: &str) -> Option<&Category> {
        let lowered = text.to_lowercase();
        self.table.iter().find(|category| category.matches(&lowered))
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }
}
