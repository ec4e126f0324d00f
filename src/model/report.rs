use serde::Serialize;

use super::Competition;

/// Column order of the final report, as export consumers expect it.
pub const REPORT_COLUMNS: [&str; 18] = [
    "Competition_ID",
    "Date",
    "Event",
    "Location",
    "Type",
    "Level",
    "Organizer_Name",
    "Organizer_Address",
    "Organizer_Phone",
    "Organizer_Email",
    "Organizer_Website",
    "Stadium_Address",
    "Competition_Code",
    "Contact_Person",
    "Events_List",
    "Events_Count",
    "Detail_URL",
    "Page",
];

/// A fixed-shape tabular view of scraped competitions.
///
/// Every row carries all columns of [`REPORT_COLUMNS`] in order; fields the
/// scrape could not fill are empty strings (`Events_Count` is `"0"`). The
/// table is a pure projection, so building it twice from the same records
/// yields identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn from_records(records: &[Competition]) -> Self {
        let rows = records
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.date.clone(),
                    c.event.clone(),
                    c.location.clone(),
                    c.kind.clone(),
                    c.level.clone(),
                    c.detail.organizer_name.clone(),
                    c.detail.organizer_address.clone(),
                    c.detail.organizer_phone.clone(),
                    c.detail.organizer_email.clone(),
                    c.detail.organizer_website.clone(),
                    c.detail.stadium_address.clone(),
                    c.detail.competition_code.clone(),
                    c.detail.contact_person.clone(),
                    c.detail.events_list(),
                    c.detail.events_count().to_string(),
                    c.detail_url.clone(),
                    c.page.to_string(),
                ]
            })
            .collect();

        Self {
            columns: REPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
