use chrono::{Duration, NaiveDate};

use crate::config::settings::WindowSettings;

use super::models::EventKind;

/// Dates to process for an event kind: an inclusive window ending at
/// `today`, oldest first
pub fn window_for(kind: EventKind, today: NaiveDate, windows: &WindowSettings) -> Vec<NaiveDate> {
    let days = match kind {
        EventKind::League => windows.league_window_days,
        EventKind::Challenge => windows.challenge_lookback_days,
    };
    date_window(today, days)
}

fn date_window(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect()
}
