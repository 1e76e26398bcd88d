use crate::domain::model::{deserialize_lenient_string, Card, CardId, Population, UNGRADED};
use crate::utils::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Deserialize)]
struct RawCatalog {
    cards: Option<Vec<RawCard>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    id: Option<CardId>,
    name: Option<String>,
    set: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    set_number: Option<String>,
    price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    psa_grade: Option<String>,
    img: Option<String>,
    rarity: Option<String>,
    artist: Option<String>,
    release_date: Option<String>,
    description: Option<String>,
    population: Option<Population>,
}

/// Empty strings count as absent, the same as a missing key.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_text(value: Option<String>, index: usize, field: &str, source_name: &str) -> Result<String> {
    present(value).ok_or_else(|| {
        CatalogError::data_load(
            source_name,
            format!("card #{} is missing required field `{}`", index, field),
        )
    })
}

impl RawCard {
    fn into_card(self, index: usize, source_name: &str) -> Result<Card> {
        let id = self.id.ok_or_else(|| {
            CatalogError::data_load(source_name, format!("card #{} is missing required field `id`", index))
        })?;
        let name = required_text(self.name, index, "name", source_name)?;
        let set = required_text(self.set, index, "set", source_name)?;
        let price = self.price.ok_or_else(|| {
            CatalogError::data_load(
                source_name,
                format!("card #{} is missing required field `price`", index),
            )
        })?;

        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::data_load(
                source_name,
                format!("card #{} has invalid price {}", index, price),
            ));
        }

        Ok(Card {
            id,
            name,
            set,
            set_number: self.set_number.unwrap_or_default(),
            price,
            psa_grade: present(self.psa_grade).unwrap_or_else(|| UNGRADED.to_string()),
            img: present(self.img),
            rarity: present(self.rarity),
            artist: present(self.artist),
            release_date: present(self.release_date),
            description: present(self.description),
            population: self.population,
        })
    }
}

/// Decode a `{"cards": [...]}` payload into validated cards, keeping file order.
pub fn parse_catalog(bytes: &[u8], source_name: &str) -> Result<Vec<Card>> {
    let raw: RawCatalog = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::data_load(source_name, format!("malformed JSON: {}", e)))?;

    let raw_cards = raw
        .cards
        .ok_or_else(|| CatalogError::data_load(source_name, "payload has no `cards` key"))?;

    let mut seen = HashSet::with_capacity(raw_cards.len());
    let mut cards = Vec::with_capacity(raw_cards.len());

    for (index, raw_card) in raw_cards.into_iter().enumerate() {
        let card = raw_card.into_card(index, source_name)?;
        if !seen.insert(card.id.clone()) {
            return Err(CatalogError::data_load(
                source_name,
                format!("card #{} reuses id {}", index, card.id),
            ));
        }
        cards.push(card);
    }

    tracing::debug!("Parsed {} cards from {}", cards.len(), source_name);
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: CatalogError) -> String {
        match err {
            CatalogError::DataLoad { reason, .. } => reason,
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_full_card() {
        let payload = br#"{
            "cards": [
                {
                    "id": 1,
                    "name": "Charizard",
                    "set": "Base Set",
                    "setNumber": "4/102",
                    "price": 350.5,
                    "psaGrade": "9",
                    "img": "img/charizard.png",
                    "rarity": "Holo Rare",
                    "artist": "Mitsuhiro Arita",
                    "releaseDate": "1999-01-09",
                    "description": "Spits fire.",
                    "population": {"total": 100, "psa10": 5, "psa9": 20, "psa8": 30, "psa7": 25, "psa6Lower": 20}
                }
            ]
        }"#;

        let cards = parse_catalog(payload, "test").unwrap();
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.id.as_str(), "1");
        assert_eq!(card.set_number, "4/102");
        assert_eq!(card.psa_grade, "9");
        assert_eq!(card.img.as_deref(), Some("img/charizard.png"));
        assert_eq!(card.population.as_ref().map(|p| p.psa6_lower), Some(20));
    }

    #[test]
    fn test_parse_applies_defaults() {
        let payload = br#"{"cards": [{"id": "a", "name": "Abra", "set": "Base Set", "price": 2, "img": "", "psaGrade": 10}]}"#;
        let cards = parse_catalog(payload, "test").unwrap();
        let card = &cards[0];
        assert_eq!(card.set_number, "");
        assert_eq!(card.psa_grade, "10");
        assert_eq!(card.img, None);
        assert_eq!(card.rarity, None);
        assert_eq!(card.population, None);
    }

    #[test]
    fn test_parse_keeps_input_order() {
        let payload = br#"{"cards": [
            {"id": 3, "name": "C", "set": "S", "price": 1},
            {"id": 1, "name": "A", "set": "S", "price": 1},
            {"id": 2, "name": "B", "set": "S", "price": 1}
        ]}"#;
        let ids: Vec<String> = parse_catalog(payload, "test")
            .unwrap()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_missing_cards_key_is_data_load_error() {
        let err = parse_catalog(br#"{"items": []}"#, "test").unwrap_err();
        assert!(reason(err).contains("`cards`"));
    }

    #[test]
    fn test_missing_required_fields() {
        let no_name = br#"{"cards": [{"id": 1, "set": "S", "price": 1}]}"#;
        assert!(reason(parse_catalog(no_name, "test").unwrap_err()).contains("`name`"));

        let no_set = br#"{"cards": [{"id": 1, "name": "N", "price": 1}]}"#;
        assert!(reason(parse_catalog(no_set, "test").unwrap_err()).contains("`set`"));

        let no_price = br#"{"cards": [{"id": 1, "name": "N", "set": "S"}]}"#;
        assert!(reason(parse_catalog(no_price, "test").unwrap_err()).contains("`price`"));

        let blank_name = br#"{"cards": [{"id": 1, "name": "  ", "set": "S", "price": 1}]}"#;
        assert!(reason(parse_catalog(blank_name, "test").unwrap_err()).contains("`name`"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let payload = br#"{"cards": [{"id": 1, "name": "N", "set": "S", "price": -0.5}]}"#;
        assert!(reason(parse_catalog(payload, "test").unwrap_err()).contains("invalid price"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let payload = br#"{"cards": [
            {"id": 1, "name": "A", "set": "S", "price": 1},
            {"id": "1", "name": "B", "set": "S", "price": 1}
        ]}"#;
        assert!(reason(parse_catalog(payload, "test").unwrap_err()).contains("reuses id 1"));
    }

    #[test]
    fn test_serialized_card_is_revalidated_on_load() {
        let invalid = Card::new(1, "", "Base Set", 1.0);
        let payload = serde_json::to_vec(&serde_json::json!({ "cards": [invalid] })).unwrap();
        assert!(reason(parse_catalog(&payload, "test").unwrap_err()).contains("`name`"));
    }

    #[test]
    fn test_not_json() {
        let err = parse_catalog(b"<html>404</html>", "cards.json").unwrap_err();
        assert!(err.is_data_load());
        assert!(err.to_string().contains("cards.json"));
    }
}
