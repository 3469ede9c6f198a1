use chrono::NaiveDate;

/// Event series a result page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    League,
    Challenge,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::League => "league",
            EventKind::Challenge => "challenge",
        }
    }

    /// Supabase bulk-insert endpoint for this kind
    pub fn sink_table(&self) -> &'static str {
        match self {
            EventKind::League => "pauper_league_results_insert",
            EventKind::Challenge => "pauper_challenge_results_insert",
        }
    }
}

/// One table row as lifted from the page, prior to validation
///
/// `deck_href` is the link target embedded in the deck-name cell.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub deck_href: Option<String>,
}

/// A validated tournament result row
///
/// Uniquely identified at the sink by `(deck_id, event_date, event_kind)`;
/// resubmitting the same date is safe because the sink upserts on that key.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentRecord {
    pub deck_id: i64,
    pub event_date: NaiveDate,
    pub event_kind: EventKind,
    pub place: String,
    pub deck_name: String,
    pub pilot: String,
    pub deck_url: String,
    pub decklist: Option<String>,
}
