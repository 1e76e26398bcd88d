use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Marker used in card data for cards that were never sent for grading.
pub const UNGRADED: &str = "Ungraded";

/// Sentinel category that disables set filtering.
pub const ALL_CATEGORY: &str = "All";

/// JSON value that may arrive either as a number or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Number(n) => n.to_string(),
            StringOrNumber::Text(s) => s,
        }
    }
}

pub(crate) fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(StringOrNumber::deserialize(deserializer)?.into()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i32> for CardId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for CardId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// How many graded copies exist in each PSA bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Population {
    pub total: u64,
    pub psa10: u64,
    pub psa9: u64,
    pub psa8: u64,
    pub psa7: u64,
    pub psa6_lower: u64,
}

/// One row of the population chart; `ratio` is relative to the largest bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBar {
    pub label: &'static str,
    pub count: u64,
    pub ratio: f64,
}

/// Only built through `parse_catalog` or `Card::new`, never deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub set: String,
    pub set_number: String,
    pub price: f64,
    pub psa_grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Population>,
}

impl Card {
    /// Minimal card; optional fields start empty and the grade as ungraded.
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        set: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set: set.into(),
            set_number: String::new(),
            price,
            psa_grade: UNGRADED.to_string(),
            img: None,
            rarity: None,
            artist: None,
            release_date: None,
            description: None,
            population: None,
        }
    }

    pub fn with_set_number(mut self, set_number: impl Into<String>) -> Self {
        self.set_number = set_number.into();
        self
    }

    pub fn with_grade(mut self, psa_grade: impl Into<String>) -> Self {
        self.psa_grade = psa_grade.into();
        self
    }

    pub fn with_population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    pub fn rarity_or_default(&self) -> &str {
        self.rarity.as_deref().unwrap_or("N/A")
    }

    pub fn artist_or_default(&self) -> &str {
        self.artist.as_deref().unwrap_or("N/A")
    }

    pub fn release_date_or_default(&self) -> &str {
        self.release_date.as_deref().unwrap_or("N/A")
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No description available.")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeTier {
    Ungraded,
    Ten,
    Nine,
    Eight,
    /// Every numeric grade from 7 down, plus anything unparsable.
    SevenOrBelow,
}

impl GradeTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            GradeTier::Ungraded => "psa-ungraded",
            GradeTier::Ten => "psa-10",
            GradeTier::Nine => "psa-9",
            GradeTier::Eight => "psa-8",
            GradeTier::SevenOrBelow => "psa-7",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeBadge {
    pub label: String,
    pub tier: GradeTier,
}

/// Selected category of the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Set(String),
}

impl Category {
    /// `"All"` maps to the sentinel, anything else names a set verbatim.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORY {
            Category::All
        } else {
            Category::Set(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => ALL_CATEGORY,
            Category::Set(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub count: usize,
    pub total_value: f64,
}

impl Summary {
    pub fn average(&self) -> f64 {
        if self.count > 0 {
            self.total_value / self.count as f64
        } else {
            0.0
        }
    }
}

/// Everything the presentation layer needs after a recompute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogView {
    pub cards: Vec<Card>,
    pub sets: Vec<String>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Card),
    Cancelled,
    NotFound,
}
