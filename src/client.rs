use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::instrument;

use crate::error::{AthleError, Result};
use crate::model::{CalendarQuery, Competition, CompetitionDetail};
use crate::pipeline::{self, ScrapeOptions};
use crate::progress::Progress;
use crate::scraper;

/// Browser identity presented to the site; the calendar serves error pages
/// to plain library user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The rest of the browser header profile. `accept-encoding` and
/// `connection` are left to the transport layer.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    headers.insert(
        HeaderName::from_static("accept-language"),
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("max-age=0"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(
            "\"Google Chrome\";v=\"143\", \"Chromium\";v=\"143\", \"Not A(Brand\";v=\"24\"",
        ),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static("?0"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static("\"Windows\""),
    );
    headers
}

/// The main entry point for scraping the athle.fr competition calendar.
///
/// `AthleClient` wraps a [`reqwest::Client`] configured with a browser
/// header profile and exposes single-page fetches plus the full scrape and
/// enrichment runs.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> athle_scraper::Result<()> {
/// use athle_scraper::{AthleClient, CalendarQuery, DateRange, NullProgress, ScrapeOptions};
///
/// let client = AthleClient::new()?;
/// let query = CalendarQuery::new("2026", DateRange::parse("2025-12-21", "2026-01-31")?);
/// let competitions = client
///     .scrape_competitions(&query, &ScrapeOptions::default(), &NullProgress)
///     .await;
/// println!("Found {} competitions", competitions.len());
/// # Ok(())
/// # }
/// ```
pub struct AthleClient {
    http: reqwest::Client,
    base_url: String,
}

impl AthleClient {
    /// Create a client against the live site.
    pub fn new() -> Result<Self> {
        Self::with_base_url(scraper::SITE_BASE_URL)
    }

    /// Create a client against an alternate site base, e.g. a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AthleError::ClientBuild)?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, cookies, timeouts, etc.
    /// The caller's client is used as-is, without the browser header
    /// profile.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and parse one page of the calendar listing.
    #[instrument(skip(self, query), fields(season = %query.season, page))]
    pub async fn get_listing_page(
        &self,
        query: &CalendarQuery,
        page: u32,
    ) -> Result<Vec<Competition>> {
        scraper::listing::get_listing_page(&self.http, &self.base_url, query, page).await
    }

    /// Fetch and parse one competition detail page. A site-relative URL is
    /// resolved against the client's base.
    #[instrument(skip(self))]
    pub async fn get_competition_detail(&self, url: &str) -> Result<CompetitionDetail> {
        let url = scraper::absolute_url(&self.base_url, url);
        scraper::detail::get_competition_detail(&self.http, &url).await
    }

    /// Collect every competition the query matches, walking all pages (and
    /// date batches, when [`ScrapeOptions::batch_days`] is set).
    ///
    /// Page and batch failures are absorbed; whatever was collected so far
    /// is returned.
    #[instrument(skip(self, progress))]
    pub async fn scrape_competitions(
        &self,
        query: &CalendarQuery,
        options: &ScrapeOptions,
        progress: &dyn Progress,
    ) -> Vec<Competition> {
        pipeline::scrape_competitions(self, query, options, progress).await
    }

    /// Enrich records in place from their detail pages. Records without a
    /// detail URL are left untouched, as are records whose page cannot be
    /// fetched.
    #[instrument(skip(self, competitions, progress), fields(count = competitions.len()))]
    pub async fn enrich_competitions(
        &self,
        competitions: &mut [Competition],
        options: &ScrapeOptions,
        progress: &dyn Progress,
    ) {
        pipeline::enrich_competitions(self, competitions, options, progress).await
    }
}
