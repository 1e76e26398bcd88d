use crate::domain::model::{Card, Summary};

pub fn summarize(cards: &[Card]) -> Summary {
    Summary {
        count: cards.len(),
        total_value: cards.iter().map(|card| card.price).sum(),
    }
}
