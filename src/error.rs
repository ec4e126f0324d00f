use ::scraper::error::SelectorErrorKind;
use chrono::NaiveDate;

/// All errors that can occur during athle.fr scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum AthleError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A regular expression pattern could not be compiled.
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    /// A date range was requested with its start after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Failed to parse a date from caller input.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// A base or listing URL could not be parsed.
    #[error("invalid URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for AthleError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        AthleError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AthleError>;
