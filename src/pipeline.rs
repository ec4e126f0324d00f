use std::time::Duration;

use tracing::warn;

use crate::client::AthleClient;
use crate::model::{CalendarQuery, Competition};
use crate::progress::Progress;

/// Rows the calendar returns per page. A shorter page is the only
/// end-of-results signal the site gives.
pub const COMPETITIONS_PER_PAGE: usize = 250;

/// Default pause between consecutive requests.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Tuning for a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Pause between consecutive requests. Tests set this to zero.
    pub delay: Duration,
    /// When set, decompose the query's date range into windows of at most
    /// this many days and paginate each window separately. Busy seasons
    /// return more rows than the site will page through in one query.
    pub batch_days: Option<u32>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            batch_days: None,
        }
    }
}

/// Collect every competition the query matches, page by page.
///
/// Failures never propagate out of a run: a failed page ends its pagination
/// loop and a failed batch leaves later batches untouched, so the caller
/// always gets whatever was collected.
pub(crate) async fn scrape_competitions(
    client: &AthleClient,
    query: &CalendarQuery,
    options: &ScrapeOptions,
    progress: &dyn Progress,
) -> Vec<Competition> {
    let mut all = Vec::new();

    match options.batch_days {
        Some(batch_days) => {
            let batches = query.range.split_into(batch_days);
            let total = batches.len();
            for (idx, batch) in batches.into_iter().enumerate() {
                progress.set_message(format!(
                    "Batch {}/{total}: {} to {}",
                    idx + 1,
                    batch.start(),
                    batch.end()
                ));
                paginate(client, &query.with_range(batch), options, progress, &mut all).await;
            }
        }
        None => paginate(client, query, options, progress, &mut all).await,
    }

    progress.finish(format!("Found {} competitions", all.len()));
    all
}

/// Walk pages 1..n of one query until the end-of-results signal.
///
/// Stops on the first fetch or parse failure, on an empty page, or after a
/// page shorter than [`COMPETITIONS_PER_PAGE`] (which is still included).
/// The politeness delay runs between page fetches, not after the last one.
async fn paginate(
    client: &AthleClient,
    query: &CalendarQuery,
    options: &ScrapeOptions,
    progress: &dyn Progress,
    all: &mut Vec<Competition>,
) {
    let mut page: u32 = 1;
    loop {
        let competitions = match client.get_listing_page(query, page).await {
            Ok(competitions) => competitions,
            Err(err) => {
                warn!(page, error = %err, "listing page failed, stopping pagination");
                break;
            }
        };
        if competitions.is_empty() {
            break;
        }

        let count = competitions.len();
        all.extend(competitions);
        progress.inc(count as u64);
        progress.set_message(format!(
            "Page {page}: {count} competitions ({} total)",
            all.len()
        ));

        if count < COMPETITIONS_PER_PAGE {
            break;
        }

        page += 1;
        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }
}

/// Fetch the detail page of every record that has one and merge the scraped
/// fields in, sequentially and in input order.
///
/// A failed detail page is logged and leaves that record's defaults in
/// place. The politeness delay runs after every record, whether or not a
/// fetch happened.
pub(crate) async fn enrich_competitions(
    client: &AthleClient,
    competitions: &mut [Competition],
    options: &ScrapeOptions,
    progress: &dyn Progress,
) {
    let total = competitions.len();
    progress.set_total(total as u64);

    for (idx, competition) in competitions.iter_mut().enumerate() {
        if !competition.detail_url.is_empty() {
            let label: String = competition.event.chars().take(30).collect();
            progress.set_message(format!("Detail {}/{total}: {label}", idx + 1));

            match client.get_competition_detail(&competition.detail_url).await {
                Ok(detail) => competition.merge_detail(detail),
                Err(err) => {
                    warn!(
                        url = %competition.detail_url,
                        error = %err,
                        "detail page failed, keeping listing fields"
                    );
                }
            }
        }

        progress.inc(1);
        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    progress.finish(format!("Enriched {total} competitions"));
}
