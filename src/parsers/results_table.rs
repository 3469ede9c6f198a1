use log::warn;
use scraper::{ElementRef, Html, Selector};

use crate::domain::RawRow;

/// Column layout is place | deck | pilot | ...; the deck cell carries the
/// link to the decklist page.
const DECK_CELL_INDEX: usize = 1;
const MIN_POPULATED_CELLS: usize = 3;

/// Outcome of scanning a fetched page for the result table
#[derive(Debug)]
pub enum TableScan {
    /// The result table exists; holds the rows that passed the
    /// structural checks
    Found(Vec<RawRow>),
    /// No result table (or no table body) on the page, meaning no event
    /// ran on that date
    NotFound,
}

impl TableScan {
    pub fn has_rows(&self) -> bool {
        matches!(self, TableScan::Found(rows) if !rows.is_empty())
    }
}

/// Scan the page for the tournament result table and lift out its rows
pub fn scan_results(html: &Html) -> TableScan {
    let table_selector =
        Selector::parse("table.table-tournament").expect("Failed to parse table selector");
    let tbody_selector = Selector::parse("tbody").expect("Failed to parse tbody selector");
    let row_selector = Selector::parse("tr").expect("Failed to parse row selector");

    let table = match html.select(&table_selector).next() {
        Some(table) => table,
        None => return TableScan::NotFound,
    };

    let body = match table.select(&tbody_selector).next() {
        Some(body) => body,
        None => return TableScan::NotFound,
    };

    let rows = body.select(&row_selector).filter_map(extract_row).collect();
    TableScan::Found(rows)
}

fn extract_row(row: ElementRef<'_>) -> Option<RawRow> {
    let cell_selector = Selector::parse("td").expect("Failed to parse cell selector");
    let link_selector = Selector::parse("a").expect("Failed to parse link selector");

    let cell_elements: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
    let cells: Vec<String> = cell_elements
        .iter()
        .map(|cell| cell.text().collect::<String>())
        .collect();

    let populated = cells.iter().filter(|text| !text.trim().is_empty()).count();
    if populated < MIN_POPULATED_CELLS {
        warn!("Skipping row: not enough columns ({populated})");
        return None;
    }

    let deck_href = cell_elements
        .get(DECK_CELL_INDEX)
        .and_then(|cell| cell.select(&link_selector).next())
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string);

    if deck_href.is_none() {
        warn!("Skipping row: no deck link found");
        return None;
    }

    Some(RawRow { cells, deck_href })
}
