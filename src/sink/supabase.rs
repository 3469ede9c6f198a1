use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::Serialize;

use crate::config::settings::SinkSettings;
use crate::domain::{EventKind, TournamentRecord};

const MAX_REPORTED_BODY_CHARS: usize = 300;

/// A batch submission the sink rejected, or that never reached it
#[derive(Debug, Clone)]
pub struct SinkFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// League rows keep the historical column names of the league results view
#[derive(Debug, Serialize)]
struct LeagueInsertRow<'a> {
    id: i64,
    event_date: String,
    place: &'a str,
    deck_name: &'a str,
    pilot: &'a str,
    deck_url: &'a str,
}

/// Challenge rows use the challenge table's own column names
#[derive(Debug, Serialize)]
struct ChallengeInsertRow<'a> {
    deck_id: i64,
    date: String,
    place: &'a str,
    deck_name: &'a str,
    pilot: &'a str,
    json_decklist: Option<&'a str>,
}

/// Batched inserts into the Supabase REST endpoints, one per event kind
///
/// The endpoints upsert on `(deck_id, event_date, event_kind)`, so
/// resubmitting a date never duplicates rows.
pub struct SupabaseSink {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl SupabaseSink {
    pub fn new(settings: &SinkSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build sink HTTP client")?;

        Ok(Self {
            client,
            rest_url: settings.rest_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Submit one date's records as a single batch. An empty batch is a
    /// no-op; a non-empty batch succeeds or fails as a unit.
    pub async fn submit(
        &self,
        kind: EventKind,
        date: NaiveDate,
        records: &[TournamentRecord],
    ) -> Result<(), SinkFailure> {
        if records.is_empty() {
            debug!("No rows to insert for {} {}", kind.label(), date);
            return Ok(());
        }

        let endpoint = self.endpoint_for(kind);
        let response = match kind {
            EventKind::League => {
                let rows: Vec<LeagueInsertRow<'_>> = records.iter().map(league_row).collect();
                self.post_batch(&endpoint, &rows).await?
            }
            EventKind::Challenge => {
                let rows: Vec<ChallengeInsertRow<'_>> = records.iter().map(challenge_row).collect();
                self.post_batch(&endpoint, &rows).await?
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SinkFailure {
            status: Some(status.as_u16()),
            message: truncate_body(&body),
        })
    }

    async fn post_batch<T: Serialize>(
        &self,
        endpoint: &str,
        rows: &T,
    ) -> Result<reqwest::Response, SinkFailure> {
        self.client
            .post(endpoint)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(|e| SinkFailure {
                status: None,
                message: e.to_string(),
            })
    }

    fn endpoint_for(&self, kind: EventKind) -> String {
        format!("{}/{}", self.rest_url, kind.sink_table())
    }
}

fn league_row(record: &TournamentRecord) -> LeagueInsertRow<'_> {
    LeagueInsertRow {
        id: record.deck_id,
        event_date: iso_date(record.event_date),
        place: &record.place,
        deck_name: &record.deck_name,
        pilot: &record.pilot,
        deck_url: &record.deck_url,
    }
}

fn challenge_row(record: &TournamentRecord) -> ChallengeInsertRow<'_> {
    ChallengeInsertRow {
        deck_id: record.deck_id,
        date: iso_date(record.event_date),
        place: &record.place,
        deck_name: &record.deck_name,
        pilot: &record.pilot,
        json_decklist: record.decklist.as_deref(),
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_REPORTED_BODY_CHARS {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(MAX_REPORTED_BODY_CHARS).collect();
        format!("{}...", truncated)
    }
}
