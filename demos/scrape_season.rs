use athle_scraper::{
    AthleClient, CalendarQuery, DateRange, Progress, ReportTable, ScrapeOptions,
};

struct PrintProgress;

impl Progress for PrintProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, msg: String) {
        println!("{msg}");
    }
    fn finish(&self, msg: String) {
        println!("{msg}");
    }
}

#[tokio::main]
async fn main() {
    let client = AthleClient::new().unwrap();
    let range = DateRange::parse("2025-11-01", "2026-01-31").unwrap();
    let query = CalendarQuery::new("2026", range);
    let options = ScrapeOptions {
        batch_days: Some(30),
        ..Default::default()
    };

    let mut competitions = client
        .scrape_competitions(&query, &options, &PrintProgress)
        .await;
    println!("Found {} competitions", competitions.len());

    client
        .enrich_competitions(&mut competitions, &options, &PrintProgress)
        .await;

    let table = ReportTable::from_records(&competitions);
    println!("{}", table.columns.join(" | "));
    for row in &table.rows {
        println!("{}", row.join(" | "));
    }
    println!("{} rows", table.len());
}
