use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use tokio::time::sleep;

use crate::config::settings::AppConfig;
use crate::domain::{
    EventKind, RecordNormalizer, RunSummary, TournamentRecord, normalize_rows, window_for,
};
use crate::fetchers::{EventResolver, PageFetcher, Resolution};
use crate::sink::SupabaseSink;

/// Outcome of processing one `(kind, date)` pair
enum DateOutcome {
    NoEvent,
    Inserted(usize),
    NoValidRows,
    FetchFailed,
    SinkFailed,
}

/// Drives the whole ingestion run: league dates first, then challenge
/// dates, each window oldest first, one date at a time.
///
/// Everything past construction is caught at the date boundary; a bad
/// date never aborts the run.
pub struct IngestionService {
    config: AppConfig,
    resolver: EventResolver,
    normalizer: RecordNormalizer,
    sink: SupabaseSink,
}

impl IngestionService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.scraper)?;
        let resolver = EventResolver::new(fetcher, config.scraper.base_url);
        let normalizer = RecordNormalizer::new(config.scraper.base_url)?;
        let sink = SupabaseSink::new(&config.sink)?;

        Ok(Self {
            config,
            resolver,
            normalizer,
            sink,
        })
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        info!("=== Starting Results Ingestion ===\n");

        let today = Utc::now().date_naive();
        let mut summary = RunSummary::default();

        for kind in [EventKind::League, EventKind::Challenge] {
            self.ingest_kind(kind, today, &mut summary).await;
        }

        summary.log_report();
        info!("=== Ingestion Complete ===");
        Ok(summary)
    }

    async fn ingest_kind(&mut self, kind: EventKind, today: NaiveDate, summary: &mut RunSummary) {
        let window = window_for(kind, today, &self.config.windows);
        info!("Processing {} {} dates...", window.len(), kind.label());

        for date in window {
            let outcome = self.process_date(kind, date).await;
            record_outcome(summary, kind, outcome);
            self.pace().await;
        }
    }

    async fn process_date(&mut self, kind: EventKind, date: NaiveDate) -> DateOutcome {
        info!("Scraping {} results for {}", kind.label(), date);

        let (rows, template) = match self.resolver.resolve(kind, date).await {
            Resolution::Found { rows, template } => (rows, template),
            Resolution::NoEvent => {
                info!("  → No {} event on {}", kind.label(), date);
                return DateOutcome::NoEvent;
            }
            Resolution::Failed(failure) => {
                warn!(
                    "  → Failed to fetch {} page for {}: {}",
                    kind.label(),
                    date,
                    failure
                );
                return DateOutcome::FetchFailed;
            }
        };

        info!("  → {} raw rows from {}", rows.len(), template.slug);

        let records = normalize_rows(&self.normalizer, &rows, date, kind);
        if records.is_empty() {
            info!("  → No valid rows for {} on {}", kind.label(), date);
            return DateOutcome::NoValidRows;
        }

        self.submit_batch(kind, date, &records).await
    }

    async fn submit_batch(
        &mut self,
        kind: EventKind,
        date: NaiveDate,
        records: &[TournamentRecord],
    ) -> DateOutcome {
        match self.sink.submit(kind, date, records).await {
            Ok(()) => {
                info!("  → Insert OK for {} ({} rows)", date, records.len());
                DateOutcome::Inserted(records.len())
            }
            Err(failure) => {
                warn!("  → Insert FAILED for {} {}: {}", kind.label(), date, failure);
                DateOutcome::SinkFailed
            }
        }
    }

    /// Fixed delay between date iterations, applied regardless of
    /// outcome, on top of the client's per-request pacing.
    async fn pace(&self) {
        sleep(Duration::from_millis(self.config.scraper.date_pacing_ms)).await;
    }
}

fn record_outcome(summary: &mut RunSummary, kind: EventKind, outcome: DateOutcome) {
    let counters = summary.for_kind(kind);
    counters.record_attempt();

    match outcome {
        DateOutcome::NoEvent => counters.record_no_event(),
        DateOutcome::Inserted(rows) => counters.record_inserted(rows),
        DateOutcome::NoValidRows => counters.record_no_valid_rows(),
        DateOutcome::FetchFailed => counters.record_fetch_failure(),
        DateOutcome::SinkFailed => counters.record_sink_failure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parsers::{TableScan, scan_results};

    #[test]
    fn test_league_page_row_becomes_a_single_record() {
        let html = scraper::Html::parse_document(
            r#"<table class="table-tournament"><tbody>
                <tr>
                    <td>1st</td>
                    <td><a href="/deck/123456">Mono Red Goblins</a></td>
                    <td>alice</td>
                </tr>
            </tbody></table>"#,
        );

        let rows = match scan_results(&html) {
            TableScan::Found(rows) => rows,
            TableScan::NotFound => panic!("expected a result table"),
        };

        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let normalizer = RecordNormalizer::new("https://www.mtggoldfish.com").unwrap();
        let records = normalize_rows(&normalizer, &rows, date, EventKind::League);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.deck_id, 123456);
        assert_eq!(record.event_date, date);
        assert_eq!(record.place, "1st");
        assert_eq!(record.deck_name, "Mono Red Goblins");
        assert_eq!(record.pilot, "alice");
        assert_eq!(record.deck_url, "https://www.mtggoldfish.com/deck/123456");
    }

    #[test]
    fn test_every_outcome_counts_as_an_attempt() {
        let mut summary = RunSummary::default();

        record_outcome(&mut summary, EventKind::League, DateOutcome::NoEvent);
        record_outcome(&mut summary, EventKind::League, DateOutcome::Inserted(5));
        record_outcome(&mut summary, EventKind::League, DateOutcome::FetchFailed);
        record_outcome(&mut summary, EventKind::Challenge, DateOutcome::SinkFailed);
        record_outcome(&mut summary, EventKind::Challenge, DateOutcome::NoValidRows);

        assert_eq!(summary.league.dates_attempted, 3);
        assert_eq!(summary.league.dates_no_event, 1);
        assert_eq!(summary.league.dates_inserted, 1);
        assert_eq!(summary.league.rows_inserted, 5);
        assert_eq!(summary.league.dates_fetch_failed, 1);
        assert_eq!(summary.challenge.dates_attempted, 2);
        assert_eq!(summary.challenge.dates_sink_failed, 1);
        assert_eq!(summary.challenge.dates_without_valid_rows, 1);
    }
}
