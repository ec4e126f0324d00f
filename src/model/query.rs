use chrono::{Days, NaiveDate};
use serde::Serialize;
use url::Url;

use crate::error::{AthleError, Result};

/// Date format used by caller input and the calendar's query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive date window, validated so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting inverted bounds before any request is made.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AthleError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = NaiveDate::parse_from_str(start, DATE_FORMAT)?;
        let end = NaiveDate::parse_from_str(end, DATE_FORMAT)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Split the range into consecutive batches spanning at most `batch_days`
    /// days each.
    ///
    /// Batches cover the whole range in order, without gaps or overlaps; the
    /// last one may be shorter. Querying the calendar batch by batch keeps
    /// each response under the server's row limits on busy seasons.
    pub fn split_into(&self, batch_days: u32) -> Vec<DateRange> {
        let mut batches = Vec::new();
        let mut cur = self.start;
        while cur <= self.end {
            let batch_end = (cur + Days::new(u64::from(batch_days))).min(self.end);
            batches.push(DateRange {
                start: cur,
                end: batch_end,
            });
            cur = batch_end + Days::new(1);
        }
        batches
    }
}

/// Search parameters for the competition calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarQuery {
    /// Federation season, e.g. `"2026"`.
    pub season: String,
    pub range: DateRange,
}

impl CalendarQuery {
    pub fn new(season: impl Into<String>, range: DateRange) -> Self {
        Self {
            season: season.into(),
            range,
        }
    }

    /// The same query narrowed to a different date window. Used when a run
    /// is decomposed into batches.
    pub fn with_range(&self, range: DateRange) -> Self {
        Self {
            season: self.season.clone(),
            range,
        }
    }

    /// Appends this query's parameters to the given URL, returning the
    /// modified URL. `page` is the 1-based listing position.
    pub fn add_to_url(&self, url: &Url, page: u32) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("frmpostback", "true")
            .append_pair("frmbase", "calendrier")
            .append_pair("frmmode", "1")
            .append_pair("frmespace", "0")
            .append_pair("frmsaisonffa", &self.season)
            .append_pair(
                "frmdate1",
                &self.range.start().format(DATE_FORMAT).to_string(),
            )
            .append_pair("frmdate2", &self.range.end().format(DATE_FORMAT).to_string())
            .append_pair("frmposition", &page.to_string());
        url
    }
}
