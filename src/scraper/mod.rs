pub(crate) mod detail;
pub(crate) mod listing;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::debug;

use crate::error::{AthleError, Result};

/// Site base prepended to relative listing links.
pub(crate) const SITE_BASE_URL: &str = "https://www.athle.fr";

/// Path of the calendar listing endpoint under the site base.
pub(crate) const LISTING_PATH: &str = "/bases/liste.aspx";

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| AthleError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AthleError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| AthleError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Text content of an element: every text node trimmed, empty nodes dropped,
/// the rest concatenated.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Make a site-relative href absolute. Anything that does not start with
/// `/` is returned as-is.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        href.to_string()
    }
}
