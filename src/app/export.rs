use crate::config::ExportFormat;
use crate::core::Storage;
use crate::domain::model::{Card, CatalogView, Summary};
use crate::utils::error::{CatalogError, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    set: &'a str,
    set_number: &'a str,
    price: String,
    psa_grade: &'a str,
    rarity: &'a str,
    population_total: Option<u64>,
}

impl<'a> From<&'a Card> for CsvRow<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            id: card.id.as_str(),
            name: &card.name,
            set: &card.set,
            set_number: &card.set_number,
            price: format!("{:.2}", card.price),
            psa_grade: &card.psa_grade,
            rarity: card.rarity.as_deref().unwrap_or(""),
            population_total: card.population.as_ref().map(|p| p.total),
        }
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    cards: &'a [Card],
    summary: &'a Summary,
}

pub fn to_csv(cards: &[Card]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for card in cards {
        writer.serialize(CsvRow::from(card))?;
    }
    writer
        .into_inner()
        .map_err(|e| CatalogError::Io(e.into_error()))
}

/// Same `{"cards": [...]}` shape the loader reads, plus the summary.
pub fn to_json(view: &CatalogView) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&JsonExport {
        cards: &view.cards,
        summary: &view.summary,
    })?)
}

/// Write the current view and return the file name used.
pub async fn export_view<S: Storage>(
    storage: &S,
    view: &CatalogView,
    format: ExportFormat,
) -> Result<&'static str> {
    let data = match format {
        ExportFormat::Csv => to_csv(&view.cards)?,
        ExportFormat::Json => to_json(view)?,
    };

    let file_name = format.file_name();
    storage.write_file(file_name, &data).await?;
    tracing::info!("💾 Exported {} cards to {}", view.cards.len(), file_name);
    Ok(file_name)
}
