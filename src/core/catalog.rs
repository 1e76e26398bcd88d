use crate::core::aggregate::summarize;
use crate::core::filter::FilterEngine;
use crate::core::loader::parse_catalog;
use crate::core::store::CardStore;
use crate::domain::model::{Card, CardId, CatalogView, Category, DeleteOutcome};
use crate::domain::ports::{CardSource, Confirm};
use crate::utils::error::{CatalogError, Result};

/// Owned browser state: the store, the current filter and the derived view.
///
/// Every mutation goes through a method here and finishes by recomputing the
/// view, so the filtered cards, the set list and the summary always agree.
#[derive(Debug, Default)]
pub struct Catalog {
    store: CardStore,
    filter: FilterEngine,
    view: CatalogView,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut catalog = Self::new();
        catalog.store.load(cards);
        catalog.recompute();
        catalog
    }

    /// Fetch and parse once. On failure the store is left empty and the error is returned.
    pub async fn load(&mut self, source: &dyn CardSource) -> Result<usize> {
        let source_name = source.describe();
        tracing::info!("📥 Loading cards from {}", source_name);

        let outcome = match source.fetch().await {
            Ok(bytes) => parse_catalog(&bytes, &source_name),
            Err(e) if e.is_data_load() => Err(e),
            Err(e) => Err(CatalogError::data_load(&source_name, e.to_string())),
        };

        match outcome {
            Ok(cards) => {
                let count = cards.len();
                self.store.load(cards);
                self.recompute();
                tracing::info!("✅ Loaded {} cards in {} sets", count, self.view.sets.len());
                Ok(count)
            }
            Err(e) => {
                self.store.clear();
                self.recompute();
                tracing::error!("❌ {}", e);
                Err(e)
            }
        }
    }

    pub fn select_category(&mut self, category: Category) {
        tracing::debug!("Category selected: {}", category);
        self.filter.set_category(category);
        self.recompute();
    }

    pub fn search(&mut self, term: &str) {
        self.filter.set_search_term(term);
        tracing::debug!("Search term: {:?}", self.filter.search_term());
        self.recompute();
    }

    pub fn reset_filters(&mut self) {
        self.filter = FilterEngine::new();
        self.recompute();
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.store.get(id)
    }

    pub fn require_card(&self, id: &CardId) -> Result<&Card> {
        self.card(id).ok_or_else(|| CatalogError::CardNotFound { id: id.to_string() })
    }

    /// Ask `confirm` first; only a yes touches the store.
    pub fn delete_card(&mut self, id: &CardId, confirm: &mut impl Confirm) -> DeleteOutcome {
        let Some(card) = self.store.get(id) else {
            tracing::debug!("Delete requested for unknown card {}", id);
            return DeleteOutcome::NotFound;
        };

        let prompt = format!("Delete \"{}\" ({}) from the catalog?", card.name, card.set);
        if !confirm.confirm(&prompt) {
            tracing::info!("Delete of card {} cancelled", id);
            return DeleteOutcome::Cancelled;
        }

        match self.store.remove(id) {
            Some(removed) => {
                let set_is_gone = match self.filter.category() {
                    Category::Set(name) => !self.store.all().iter().any(|c| &c.set == name),
                    Category::All => false,
                };
                if set_is_gone {
                    tracing::debug!("Set {} is gone, falling back to All", self.filter.category());
                    self.filter.set_category(Category::All);
                }
                self.recompute();
                tracing::info!("🗑️ Deleted card {} ({})", removed.id, removed.name);
                DeleteOutcome::Deleted(removed)
            }
            None => DeleteOutcome::NotFound,
        }
    }

    fn recompute(&mut self) {
        let cards = self.filter.apply(self.store.all());
        let summary = summarize(&cards);
        self.view = CatalogView {
            sets: self.store.distinct_sets(),
            cards,
            summary,
        };
    }
}
