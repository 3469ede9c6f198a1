use chrono::NaiveDate;
use log::{debug, info};
use scraper::Html;

use crate::config::events::{UrlTemplate, templates_for};
use crate::domain::{EventKind, RawRow};
use crate::parsers::{TableScan, scan_results};

use super::page_fetcher::{FetchFailure, PageFetcher};

/// Outcome of resolving an event page for one `(kind, date)` pair
#[derive(Debug)]
pub enum Resolution {
    /// A template produced a populated result table
    Found {
        rows: Vec<RawRow>,
        template: UrlTemplate,
    },
    /// Pages were reachable but none carried result rows; no event of
    /// this kind ran on that date
    NoEvent,
    /// Every candidate page failed to fetch
    Failed(FetchFailure),
}

/// Tries each URL template for a kind in priority order and keeps the
/// first one that yields a populated result table.
///
/// Template order is fixed priority. Once a template matches, the rest
/// are not fetched for that date.
pub struct EventResolver {
    fetcher: PageFetcher,
    base_url: &'static str,
}

impl EventResolver {
    pub fn new(fetcher: PageFetcher, base_url: &'static str) -> Self {
        Self { fetcher, base_url }
    }

    pub async fn resolve(&mut self, kind: EventKind, date: NaiveDate) -> Resolution {
        let mut last_failure = None;
        let mut fetched_any = false;

        for template in templates_for(kind) {
            let url = template.url_for(self.base_url, date);
            debug!("Trying {}", url);

            let body = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(failure) => {
                    info!("Fetch failed for {}: {}", url, failure);
                    last_failure = Some(failure);
                    continue;
                }
            };
            fetched_any = true;

            let html = Html::parse_document(&body);
            match scan_results(&html) {
                TableScan::Found(rows) if !rows.is_empty() => {
                    return Resolution::Found {
                        rows,
                        template: *template,
                    };
                }
                TableScan::Found(_) | TableScan::NotFound => {
                    debug!("No result rows at {}", url);
                }
            }
        }

        match (fetched_any, last_failure) {
            (false, Some(failure)) => Resolution::Failed(failure),
            _ => Resolution::NoEvent,
        }
    }
}
