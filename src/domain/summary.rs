use log::info;

use super::models::EventKind;

/// Per-kind ingestion counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub dates_attempted: usize,
    pub dates_no_event: usize,
    pub dates_inserted: usize,
    pub rows_inserted: usize,
    pub dates_without_valid_rows: usize,
    pub dates_fetch_failed: usize,
    pub dates_sink_failed: usize,
}

impl KindSummary {
    pub fn record_attempt(&mut self) {
        self.dates_attempted += 1;
    }

    pub fn record_no_event(&mut self) {
        self.dates_no_event += 1;
    }

    pub fn record_inserted(&mut self, rows: usize) {
        self.dates_inserted += 1;
        self.rows_inserted += rows;
    }

    pub fn record_no_valid_rows(&mut self) {
        self.dates_without_valid_rows += 1;
    }

    pub fn record_fetch_failure(&mut self) {
        self.dates_fetch_failed += 1;
    }

    pub fn record_sink_failure(&mut self) {
        self.dates_sink_failed += 1;
    }
}

/// Counters for a whole ingestion run; the externally observable result
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub league: KindSummary,
    pub challenge: KindSummary,
}

impl RunSummary {
    pub fn for_kind(&mut self, kind: EventKind) -> &mut KindSummary {
        match kind {
            EventKind::League => &mut self.league,
            EventKind::Challenge => &mut self.challenge,
        }
    }

    pub fn log_report(&self) {
        info!("=== Run Summary ===");
        log_kind_report("league", &self.league);
        log_kind_report("challenge", &self.challenge);
    }
}

fn log_kind_report(label: &str, summary: &KindSummary) {
    info!(
        "  {}: {} dates attempted, {} no event, {} inserted ({} rows), {} without valid rows, {} fetch failures, {} sink failures",
        label,
        summary.dates_attempted,
        summary.dates_no_event,
        summary.dates_inserted,
        summary.rows_inserted,
        summary.dates_without_valid_rows,
        summary.dates_fetch_failed,
        summary.dates_sink_failed
    );
}
