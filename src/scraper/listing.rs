use ::scraper::{ElementRef, Selector};
use regex::Regex;
use tracing::{debug, instrument};
use url::Url;

use crate::error::Result;
use crate::model::{CalendarQuery, Competition, CompetitionDetail};
use crate::scraper::{self, absolute_url, element_text, LISTING_PATH};

#[instrument(skip(client, query), fields(season = %query.season, page))]
pub(crate) async fn get_listing_page(
    client: &reqwest::Client,
    base_url: &str,
    query: &CalendarQuery,
    page: u32,
) -> Result<Vec<Competition>> {
    let listing = Url::parse(&format!("{base_url}{LISTING_PATH}"))?;
    let url = query.add_to_url(&listing, page);
    let document = scraper::get_document(client, url.as_str()).await?;
    let competitions = parse_competitions(&document, page, base_url)?;

    debug!(count = competitions.len(), "parsed listing page");

    Ok(competitions)
}

/// Parse one page of the calendar listing into competition records.
///
/// Rows that do not carry the full set of cells are skipped; within a row,
/// anything missing degrades to an empty field. Detail links are made
/// absolute against `base_url`.
pub(crate) fn parse_competitions(
    document: &scraper::Html,
    page: u32,
    base_url: &str,
) -> Result<Vec<Competition>> {
    let row_selector = Selector::parse("tr.clignotant")?;
    let cell_selector = Selector::parse("td")?;
    let titled_link_selector = Selector::parse("a[title]")?;
    let link_selector = Selector::parse("a")?;
    let id_re = Regex::new(r"numéro : (\d+)")?;

    let mut competitions = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 7 {
            continue;
        }

        let id = cells[0]
            .select(&titled_link_selector)
            .next()
            .and_then(|link| link.value().attr("title"))
            .and_then(|title| id_re.captures(title))
            .map(|captures| captures[1].to_string())
            .unwrap_or_default();

        let detail_url = cells[6]
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(|href| absolute_url(base_url, href))
            .unwrap_or_default();

        competitions.push(Competition {
            id,
            date: element_text(&cells[0]),
            event: element_text(&cells[1]),
            location: element_text(&cells[2]),
            kind: element_text(&cells[3]),
            level: element_text(&cells[4]),
            detail_url,
            page,
            detail: CompetitionDetail::default(),
        });
    }

    Ok(competitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{Html, SITE_BASE_URL};

    const LISTING_PAGE: &str = r##"
        <table>
          <tr class="clignotant">
            <td><a href="#" title="Compétition numéro : 437584">15/11/25</a></td>
            <td>Meeting National en Salle</td>
            <td>Lyon</td>
            <td>Salle</td>
            <td>National</td>
            <td>Rhône</td>
            <td><a href="/competition/437584">Détails</a></td>
          </tr>
          <tr class="clignotant">
            <td>16/11/25</td>
            <td>Cross du Parc</td>
            <td>Vichy</td>
            <td>Cross</td>
            <td>Départemental</td>
            <td>Allier</td>
            <td><a href="https://autre.example/cross">Détails</a></td>
          </tr>
          <tr class="clignotant">
            <td>17/11/25</td>
            <td>Ligne incomplète</td>
            <td>Nulle part</td>
          </tr>
          <tr>
            <td>18/11/25</td><td>Pas clignotant</td><td>x</td>
            <td>x</td><td>x</td><td>x</td><td>x</td>
          </tr>
        </table>
    "##;

    #[test]
    fn parses_full_rows_and_skips_short_ones() {
        let document = Html::parse_document(LISTING_PAGE);
        let competitions = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();

        assert_eq!(competitions.len(), 2);

        let first = &competitions[0];
        assert_eq!(first.id, "437584");
        assert_eq!(first.date, "15/11/25");
        assert_eq!(first.event, "Meeting National en Salle");
        assert_eq!(first.location, "Lyon");
        assert_eq!(first.kind, "Salle");
        assert_eq!(first.level, "National");
        assert_eq!(first.page, 1);
        assert_eq!(
            first.detail_url,
            "https://www.athle.fr/competition/437584"
        );
        assert_eq!(first.detail, CompetitionDetail::default());
    }

    #[test]
    fn row_without_titled_link_gets_an_empty_id() {
        let document = Html::parse_document(LISTING_PAGE);
        let competitions = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();

        let second = &competitions[1];
        assert_eq!(second.id, "");
        assert_eq!(second.detail_url, "https://autre.example/cross");
    }

    #[test]
    fn row_without_detail_link_is_kept_with_an_empty_url() {
        let page = r##"
            <table>
              <tr class="clignotant">
                <td><a href="#" title="numéro : 99">01/02/26</a></td>
                <td>Kid Athlé</td><td>Pau</td><td>Salle</td>
                <td>Départemental</td><td></td><td>pas de lien</td>
              </tr>
            </table>
        "##;
        let document = Html::parse_document(page);
        let competitions = parse_competitions(&document, 3, SITE_BASE_URL).unwrap();

        assert_eq!(competitions.len(), 1);
        assert_eq!(competitions[0].id, "99");
        assert_eq!(competitions[0].detail_url, "");
        assert_eq!(competitions[0].level, "Départemental");
        assert_eq!(competitions[0].page, 3);
    }

    #[test]
    fn unparsable_title_yields_an_empty_id() {
        let page = r##"
            <table>
              <tr class="clignotant">
                <td><a href="#" title="voir le détail">01/02/26</a></td>
                <td>x</td><td>x</td><td>x</td><td>x</td><td>x</td><td>x</td>
              </tr>
            </table>
        "##;
        let document = Html::parse_document(page);
        let competitions = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();

        assert_eq!(competitions.len(), 1);
        assert_eq!(competitions[0].id, "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let document = Html::parse_document(LISTING_PAGE);
        let first = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();
        let second = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn page_without_rows_parses_to_nothing() {
        let document = Html::parse_document("<table></table>");
        let competitions = parse_competitions(&document, 1, SITE_BASE_URL).unwrap();
        assert!(competitions.is_empty());
    }
}
