use crate::core::grade::classify_grade;
use crate::domain::model::{Card, CatalogView, Summary, ALL_CATEGORY};
use crate::utils::format::{format_count, format_price};

/// Hero line: `3 cards · $22.00`.
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "{} cards · {}",
        summary.count,
        format_price(summary.total_value)
    )
}

pub fn render_card_line(card: &Card) -> String {
    let badge = classify_grade(&card.psa_grade);
    let mut line = format!("[{}] #{} {} | {}", badge.label, card.id, card.name, card.set);
    if !card.set_number.is_empty() {
        line.push_str(" | ");
        line.push_str(&card.set_number);
    }
    line.push_str("  ");
    line.push_str(&format_price(card.price));
    line
}

pub fn render_grid(view: &CatalogView) -> String {
    if view.cards.is_empty() {
        return format!("No cards to show.\n{}\n", render_summary(&view.summary));
    }

    let mut out = String::new();
    for card in &view.cards {
        out.push_str(&render_card_line(card));
        out.push('\n');
    }
    out.push_str(&render_summary(&view.summary));
    out.push('\n');
    out
}

/// Category selector entries: "All" first, then every set.
pub fn render_sets(sets: &[String]) -> String {
    let mut out = String::from(ALL_CATEGORY);
    out.push('\n');
    for set in sets {
        out.push_str(set);
        out.push('\n');
    }
    out
}

fn bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

pub fn render_detail(card: &Card, bar_width: usize) -> String {
    let badge = classify_grade(&card.psa_grade);
    let mut out = String::new();

    out.push_str(&format!("{}  [{}] ({})\n", card.name, badge.label, badge.tier.css_class()));
    out.push_str(&format!("  Set:          {}\n", card.set));
    out.push_str(&format!("  Set number:   {}\n", card.set_number));
    out.push_str(&format!("  Rarity:       {}\n", card.rarity_or_default()));
    out.push_str(&format!("  Artist:       {}\n", card.artist_or_default()));
    out.push_str(&format!("  Release date: {}\n", card.release_date_or_default()));
    out.push_str(&format!("  Price:        {}\n", format_price(card.price)));
    if let Some(img) = &card.img {
        out.push_str(&format!("  Image:        {}\n", img));
    }
    out.push_str(&format!("  {}\n", card.description_or_default()));

    if let Some(population) = &card.population {
        out.push_str(&format!(
            "  Population (total graded {}):\n",
            format_count(population.total)
        ));
        for row in population.distribution() {
            out.push_str(&format!(
                "    PSA {:>2} {:<width$} {}\n",
                row.label,
                bar(row.ratio, bar_width),
                format_count(row.count),
                width = bar_width
            ));
        }
    }

    out
}
