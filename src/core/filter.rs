use crate::domain::model::{Card, Category};

/// Category + free-text search over a card sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEngine {
    category: Category,
    search_term: String,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Not checked against the store; an unknown set simply matches nothing.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Stored trimmed and lower-cased.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_identity(&self) -> bool {
        self.category == Category::All && self.search_term.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        if let Category::Set(name) = &self.category {
            if &card.set != name {
                return false;
            }
        }

        if self.search_term.is_empty() {
            return true;
        }

        [&card.name, &card.set, &card.set_number]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search_term))
    }

    /// Matching cards in their original relative order.
    pub fn apply(&self, cards: &[Card]) -> Vec<Card> {
        cards
            .iter()
            .filter(|card| self.matches(card))
            .cloned()
            .collect()
    }
}
