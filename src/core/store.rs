use crate::domain::model::{Card, CardId};
use std::collections::BTreeSet;

/// In-memory owner of every loaded card, in load order.
#[derive(Debug, Default, Clone)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn load(&mut self, cards: Vec<Card>) {
        tracing::debug!("Card store replaced: {} -> {} cards", self.cards.len(), cards.len());
        self.cards = cards;
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Remove the card with `id`; absent ids are ignored.
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let position = self.cards.iter().position(|card| &card.id == id)?;
        Some(self.cards.remove(position))
    }

    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Unique set names, sorted lexicographically.
    pub fn distinct_sets(&self) -> Vec<String> {
        self.cards
            .iter()
            .map(|card| card.set.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
