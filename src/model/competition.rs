use serde::Serialize;

/// A single competition as listed on the calendar.
///
/// The listing columns (`date` through `level`) are kept as the raw trimmed
/// strings the page shows; the site formats them too inconsistently to parse
/// further. `id` comes from the row's title attribute and is empty when that
/// attribute is missing or malformed. `detail_url` is empty for rows without
/// a detail link; such records are never enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Competition {
    pub id: String,
    pub date: String,
    pub event: String,
    pub location: String,
    pub kind: String,
    pub level: String,
    pub detail_url: String,
    /// 1-based listing page this record was observed on.
    pub page: u32,
    pub detail: CompetitionDetail,
}

impl Competition {
    /// Replace the enrichment fields with data scraped from the detail page.
    pub fn merge_detail(&mut self, detail: CompetitionDetail) {
        self.detail = detail;
    }
}

/// Fields scraped from a competition's detail page.
///
/// Every field defaults to empty; the detail parser fills whatever the page
/// actually provides, so any subset may remain empty after enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompetitionDetail {
    pub organizer_name: String,
    pub organizer_address: String,
    pub organizer_phone: String,
    pub organizer_email: String,
    pub organizer_website: String,
    pub stadium_address: String,
    pub competition_code: String,
    pub contact_person: String,
    /// Event names in document order.
    pub events: Vec<String>,
}

impl CompetitionDetail {
    /// All event names joined for display, `"100m; 200m; Longueur"` style.
    pub fn events_list(&self) -> String {
        self.events.join("; ")
    }

    /// Number of events on the programme.
    pub fn events_count(&self) -> usize {
        self.events.len()
    }
}
