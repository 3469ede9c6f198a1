use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use regex::Regex;

use super::models::{EventKind, RawRow, TournamentRecord};

/// Converts raw table rows into validated records
pub struct RecordNormalizer {
    base_url: String,
    deck_id_regex: Regex,
}

impl RecordNormalizer {
    pub fn new(base_url: &str) -> Result<Self> {
        let deck_id_regex =
            Regex::new(r"/(\d+)/?$").context("Failed to compile deck ID regex")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            deck_id_regex,
        })
    }

    /// Normalize one raw row. Rows whose deck link does not end in a
    /// numeric ID are invalid and dropped, never stored with a null id.
    pub fn normalize(
        &self,
        row: &RawRow,
        date: NaiveDate,
        kind: EventKind,
    ) -> Option<TournamentRecord> {
        let href = row.deck_href.as_deref()?;
        let deck_url = self.absolutize(href);

        let deck_id = match self.derive_deck_id(&deck_url) {
            Some(id) => id,
            None => {
                warn!("Could not extract numeric deck id from URL: {}", deck_url);
                return None;
            }
        };

        Some(TournamentRecord {
            deck_id,
            event_date: date,
            event_kind: kind,
            place: cell_text(row, 0),
            deck_name: cell_text(row, 1),
            pilot: cell_text(row, 2),
            deck_url,
            decklist: None,
        })
    }

    /// Last non-empty path segment of the deck URL, as a non-negative integer
    fn derive_deck_id(&self, deck_url: &str) -> Option<i64> {
        let path = strip_fragment_and_query(deck_url);
        let captures = self.deck_id_regex.captures(path)?;
        captures.get(1)?.as_str().parse().ok()
    }

    fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href)
        }
    }
}

/// Normalize every raw row for one date, dropping invalid rows
pub fn normalize_rows(
    normalizer: &RecordNormalizer,
    rows: &[RawRow],
    date: NaiveDate,
    kind: EventKind,
) -> Vec<TournamentRecord> {
    rows.iter()
        .filter_map(|row| normalizer.normalize(row, date, kind))
        .collect()
}

fn cell_text(row: &RawRow, index: usize) -> String {
    row.cells
        .get(index)
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default()
}

fn strip_fragment_and_query(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.split('?').next().unwrap_or(without_fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new("https://www.mtggoldfish.com").unwrap()
    }

    fn raw_row(cells: &[&str], deck_href: Option<&str>) -> RawRow {
        RawRow {
            cells: cells.iter().map(|c| c.to_string()).collect(),
            deck_href: deck_href.map(str::to_string),
        }
    }

    fn march_tenth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_league_row_normalizes_to_record() {
        let row = raw_row(
            &["1st", "Mono Red Goblins", "alice"],
            Some("/deck/123456"),
        );

        let record = normalizer()
            .normalize(&row, march_tenth(), EventKind::League)
            .unwrap();

        assert_eq!(record.deck_id, 123456);
        assert_eq!(record.event_date, march_tenth());
        assert_eq!(record.event_kind, EventKind::League);
        assert_eq!(record.place, "1st");
        assert_eq!(record.deck_name, "Mono Red Goblins");
        assert_eq!(record.pilot, "alice");
        assert_eq!(record.deck_url, "https://www.mtggoldfish.com/deck/123456");
        assert_eq!(record.decklist, None);
    }

    #[test]
    fn test_non_numeric_deck_segment_is_invalid() {
        let row = raw_row(&["1st", "Some Deck", "bob"], Some("/deck/abc#online"));

        assert!(
            normalizer()
                .normalize(&row, march_tenth(), EventKind::League)
                .is_none()
        );
    }

    #[test]
    fn test_fragment_and_query_are_ignored_for_deck_id() {
        let with_fragment = raw_row(&["2nd", "Affinity", "carol"], Some("/deck/654321#online"));
        let with_query = raw_row(&["3rd", "Burn", "dave"], Some("/deck/777?tab=online"));

        let n = normalizer();
        assert_eq!(
            n.normalize(&with_fragment, march_tenth(), EventKind::League)
                .unwrap()
                .deck_id,
            654321
        );
        assert_eq!(
            n.normalize(&with_query, march_tenth(), EventKind::League)
                .unwrap()
                .deck_id,
            777
        );
    }

    #[test]
    fn test_trailing_slash_still_yields_deck_id() {
        let row = raw_row(&["4th", "Tron", "erin"], Some("/deck/888/"));

        let record = normalizer()
            .normalize(&row, march_tenth(), EventKind::Challenge)
            .unwrap();

        assert_eq!(record.deck_id, 888);
    }

    #[test]
    fn test_absolute_deck_url_is_kept_as_is() {
        let row = raw_row(
            &["5th", "Elves", "frank"],
            Some("https://www.mtggoldfish.com/deck/999"),
        );

        let record = normalizer()
            .normalize(&row, march_tenth(), EventKind::League)
            .unwrap();

        assert_eq!(record.deck_url, "https://www.mtggoldfish.com/deck/999");
        assert_eq!(record.deck_id, 999);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let row = raw_row(
            &["  1st ", "\n  Mono Red Goblins ", " alice\t"],
            Some("/deck/123456"),
        );

        let record = normalizer()
            .normalize(&row, march_tenth(), EventKind::League)
            .unwrap();

        assert_eq!(record.place, "1st");
        assert_eq!(record.deck_name, "Mono Red Goblins");
        assert_eq!(record.pilot, "alice");
    }

    #[test]
    fn test_row_without_deck_link_is_invalid() {
        let row = raw_row(&["1st", "No Link Deck", "gail"], None);

        assert!(
            normalizer()
                .normalize(&row, march_tenth(), EventKind::League)
                .is_none()
        );
    }

    #[test]
    fn test_normalize_rows_drops_only_invalid_rows() {
        let rows = vec![
            raw_row(&["1st", "Valid", "alice"], Some("/deck/1")),
            raw_row(&["2nd", "Invalid", "bob"], Some("/deck/not-a-number")),
            raw_row(&["3rd", "Also Valid", "carol"], Some("/deck/3")),
        ];

        let records = normalize_rows(&normalizer(), &rows, march_tenth(), EventKind::Challenge);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].deck_id, 1);
        assert_eq!(records[1].deck_id, 3);
    }
}
