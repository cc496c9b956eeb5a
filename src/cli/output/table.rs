//! Table output formatting for CLI commands
//!
//! Formats cards, rulings and bulk dumps using comfy-table, with colored
//! legality cells when the terminal supports them.

use crate::domain::models::{BulkDataInfo, Card, Legality, Ruling};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a list of cards as a table
    pub fn format_cards(&self, cards: &[Card]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Name", "Set", "#", "Mana", "Type", "Rarity", "USD"]));

        for card in cards {
            table.add_row(vec![
                Cell::new(&card.name),
                Cell::new(card.set_code.to_uppercase()),
                Cell::new(&card.collector_number),
                Cell::new(card.mana_cost.as_deref().unwrap_or("")),
                Cell::new(truncate_text(card.type_line.as_deref().unwrap_or(""), 40)),
                Cell::new(&card.rarity),
                Cell::new(card.prices.usd.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    /// Format a single card with its text and legalities
    pub fn format_card_details(&self, card: &Card) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Field", "Value"]));

        let mut rows: Vec<(&str, String)> = vec![
            ("Name", card.name.clone()),
            ("Mana cost", card.mana_cost.clone().unwrap_or_default()),
            ("Type", card.type_line.clone().unwrap_or_default()),
            ("Oracle text", card.oracle_text.clone().unwrap_or_default()),
        ];
        if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
            rows.push(("P/T", format!("{power}/{toughness}")));
        }
        if let Some(loyalty) = &card.loyalty {
            rows.push(("Loyalty", loyalty.clone()));
        }
        rows.push(("Set", format!("{} ({})", card.set_name, card.set_code.to_uppercase())));
        rows.push(("Released", card.released_at.to_string()));
        rows.push(("Rarity", card.rarity.clone()));
        if let Some(artist) = &card.artist {
            rows.push(("Artist", artist.clone()));
        }

        for (field, value) in rows {
            table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), Cell::new(value)]);
        }

        let mut legality = self.create_base_table();
        legality.set_header(header(&["Format", "Legality"]));
        for (format, status) in card.legality.formats() {
            let cell = if self.use_colors {
                Cell::new(status).fg(legality_color(status))
            } else {
                Cell::new(status)
            };
            legality.add_row(vec![Cell::new(format), cell]);
        }

        format!("{table}\n{legality}")
    }

    /// Format rulings as a table
    pub fn format_rulings(&self, rulings: &[Ruling]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Date", "Source", "Comment"]));

        for ruling in rulings {
            table.add_row(vec![
                Cell::new(ruling.published_at),
                Cell::new(&ruling.source),
                Cell::new(&ruling.comment),
            ]);
        }

        table.to_string()
    }

    /// Format bulk dump descriptors as a table
    pub fn format_bulk_sources<'a>(&self, sources: impl IntoIterator<Item = &'a BulkDataInfo>) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Type", "Updated", "Size", "Download"]));

        for source in sources {
            table.add_row(vec![
                Cell::new(&source.kind),
                Cell::new(source.updated_at.format("%Y-%m-%d %H:%M UTC")),
                Cell::new(format_size(source.size)),
                Cell::new(&source.download_uri),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

const fn legality_color(legality: Legality) -> Color {
    match legality {
        Legality::Legal => Color::Green,
        Legality::Restricted => Color::Yellow,
        Legality::Banned => Color::Red,
        Legality::NotLegal => Color::DarkGrey,
    }
}

/// Truncate text to a maximum number of characters
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Human-readable byte count
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
