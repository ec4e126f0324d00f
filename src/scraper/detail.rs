use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use regex::Regex;
use tracing::instrument;

use crate::error::Result;
use crate::model::CompetitionDetail;
use crate::scraper::{self, element_text};

/// Labels of the practical-information paragraphs. The organizer name shows
/// up with either apostrophe depending on which backend rendered the page.
const ORGANIZER_NAME_LABELS: [&str; 2] = ["Nom de l’organisateur", "Nom de l'organisateur"];

#[instrument(skip(client))]
pub(crate) async fn get_competition_detail(
    client: &reqwest::Client,
    url: &str,
) -> Result<CompetitionDetail> {
    let document = scraper::get_document(client, url).await?;
    parse_detail(&document)
}

/// Parse a competition detail page.
///
/// Every field is optional on the page; whatever cannot be found stays at
/// its empty default. The organizer email is tried through an ordered list
/// of strategies and the first one that produces a value wins.
pub(crate) fn parse_detail(document: &scraper::Html) -> Result<CompetitionDetail> {
    let info_selector = Selector::parse("section#infoPratique")?;
    let paragraph_selector = Selector::parse("p")?;
    let mailto_selector = Selector::parse(r#"a[href*="mailto:"]"#)?;
    let card_selector = Selector::parse("div.club-card")?;
    let events_card_selector = Selector::parse("section#epreuves div.club-card")?;
    let event_name_selector = Selector::parse("h3.text-normal")?;
    let email_re = Regex::new(r"[\w.-]+@[\w.-]+\.\w+")?;
    let email_label_re = Regex::new(r"(?i)Email\s*[:\-]?\s*([\w.-]+@[\w.-]+\.\w+)")?;
    let code_re = Regex::new(r"Code compétition\s*:\s*(\d+)")?;
    let contact_re = Regex::new(r"Personnes à contacter.*\n*(.+)")?;

    let info_section = document.select(&info_selector).next();
    let paragraphs: Vec<String> = info_section
        .map(|section| {
            section
                .select(&paragraph_selector)
                .map(|p| element_text(&p))
                .collect()
        })
        .unwrap_or_default();

    let organizer_email = [
        email_from_mailto_link(info_section, &mailto_selector),
        email_from_labeled_paragraph(&paragraphs, &email_re),
        email_from_section_text(info_section, &email_label_re),
    ]
    .into_iter()
    .flatten()
    .next()
    .unwrap_or_default();

    let organizer_name = paragraphs
        .iter()
        .find(|text| ORGANIZER_NAME_LABELS.iter().any(|label| text.contains(label)))
        .map(|text| after_colon(text))
        .unwrap_or_default();

    let organizer_address = paragraphs
        .iter()
        .find(|text| text.contains("Adresse") && !text.to_lowercase().contains("stade"))
        .map(|text| after_colon(text))
        .unwrap_or_default();

    let organizer_phone = paragraphs
        .iter()
        .find(|text| text.contains("Téléphone"))
        .map(|text| after_colon(text))
        .unwrap_or_default();

    let organizer_website = paragraphs
        .iter()
        .find(|text| text.contains("Site internet"))
        .map(|text| after_colon(text))
        .filter(|value| value != "-")
        .unwrap_or_default();

    let stadium_address = paragraphs
        .iter()
        .find(|text| text.contains("Adresse du stade"))
        .map(|text| after_colon(text))
        .unwrap_or_default();

    let club_card_text = document
        .select(&card_selector)
        .next()
        .map(|card| block_text(&card))
        .unwrap_or_default();

    let competition_code = code_re
        .captures(&club_card_text)
        .map(|captures| captures[1].to_string())
        .unwrap_or_default();

    let contact_person = contact_re
        .captures(&club_card_text)
        .map(|captures| captures[1].trim().chars().take(100).collect())
        .unwrap_or_default();

    let events: Vec<String> = document
        .select(&events_card_selector)
        .filter_map(|card| {
            card.select(&event_name_selector)
                .next()
                .map(|heading| element_text(&heading))
        })
        .collect();

    Ok(CompetitionDetail {
        organizer_name,
        organizer_address,
        organizer_phone,
        organizer_email,
        organizer_website,
        stadium_address,
        competition_code,
        contact_person,
        events,
    })
}

/// First non-empty address among the section's `mailto:` links.
fn email_from_mailto_link(
    info_section: Option<ElementRef>,
    mailto_selector: &Selector,
) -> Option<String> {
    info_section?
        .select(mailto_selector)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| href.replace("mailto:", "").trim().to_string())
        .find(|email| !email.is_empty())
}

/// First paragraph labeled `Email` that yields a value: an email-shaped
/// token after the colon if there is one, otherwise the raw trailing text
/// (a lone placeholder dash counts as no value).
fn email_from_labeled_paragraph(paragraphs: &[String], email_re: &Regex) -> Option<String> {
    paragraphs
        .iter()
        .filter(|text| text.contains("Email"))
        .find_map(|text| {
            let value = after_colon(text);
            if let Some(found) = email_re.find(&value) {
                return Some(found.as_str().to_string());
            }
            if !value.is_empty() && value != "-" {
                return Some(value);
            }
            None
        })
}

/// Last resort: scan the whole section's text for an `Email` label followed
/// by an address, case-insensitively.
fn email_from_section_text(
    info_section: Option<ElementRef>,
    email_label_re: &Regex,
) -> Option<String> {
    let section_text: String = info_section?.text().collect();
    email_label_re
        .captures(&section_text)
        .map(|captures| captures[1].to_string())
}

/// The trimmed remainder of `text` after its first colon, or empty.
fn after_colon(text: &str) -> String {
    text.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Element text as trimmed lines: one per text node, empties dropped.
fn block_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::Html;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <div class="club-card">
            <h2>Comité départemental</h2>
            <p>Code compétition : 437584</p>
            <p>Personnes à contacter</p>
            <p>Jean Dupont</p>
          </div>
          <section id="infoPratique">
            <p>Nom de l’organisateur : CD33 Athlétisme</p>
            <p>Adresse : 12 rue des Sports, Bordeaux</p>
            <p>Téléphone : 05 56 00 00 00</p>
            <p>Email : contact@cd33.fr</p>
            <p>Site internet : https://cd33.athle.fr</p>
            <p>Adresse du stade : Stadium Chaban-Delmas, Bordeaux</p>
          </section>
          <section id="epreuves">
            <div class="club-card"><h3 class="text-normal">60m</h3></div>
            <div class="club-card"><h3 class="text-normal">60m Haies</h3></div>
            <div class="club-card"><h3 class="text-normal">Saut en hauteur</h3></div>
          </section>
        </body></html>
    "#;

    fn parse(html: &str) -> CompetitionDetail {
        parse_detail(&Html::parse_document(html)).unwrap()
    }

    #[test]
    fn extracts_every_field_from_a_complete_page() {
        let detail = parse(DETAIL_PAGE);

        assert_eq!(detail.organizer_name, "CD33 Athlétisme");
        assert_eq!(detail.organizer_address, "12 rue des Sports, Bordeaux");
        assert_eq!(detail.organizer_phone, "05 56 00 00 00");
        assert_eq!(detail.organizer_email, "contact@cd33.fr");
        assert_eq!(detail.organizer_website, "https://cd33.athle.fr");
        assert_eq!(detail.stadium_address, "Stadium Chaban-Delmas, Bordeaux");
        assert_eq!(detail.competition_code, "437584");
        assert_eq!(detail.contact_person, "Jean Dupont");
        assert_eq!(
            detail.events,
            vec!["60m", "60m Haies", "Saut en hauteur"]
        );
        assert_eq!(detail.events_count(), 3);
        assert_eq!(detail.events_list(), "60m; 60m Haies; Saut en hauteur");
    }

    #[test]
    fn mailto_link_wins_over_labeled_paragraph() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p><a href="mailto:direct@club.fr">Nous écrire</a></p>
              <p>Email : autre@club.fr</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "direct@club.fr");
    }

    #[test]
    fn empty_mailto_links_are_skipped() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p><a href="mailto:">Nous écrire</a></p>
              <p><a href="mailto:secretariat@club.fr">ou ici</a></p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "secretariat@club.fr");
    }

    #[test]
    fn labeled_paragraph_extracts_the_email_shaped_token() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Email : écrire à orga@meeting.fr de préférence le soir</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "orga@meeting.fr");
    }

    #[test]
    fn labeled_paragraph_falls_back_to_raw_text() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Email : voir le site du club</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "voir le site du club");
    }

    #[test]
    fn placeholder_dash_email_is_ignored() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Email : -</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "");
    }

    #[test]
    fn section_wide_scan_finds_emails_outside_paragraphs() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <div>EMAIL - engagements@ligue.fr</div>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_email, "engagements@ligue.fr");
    }

    #[test]
    fn first_labeled_paragraph_wins() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Téléphone : 01 11 11 11 11</p>
              <p>Téléphone : 02 22 22 22 22</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_phone, "01 11 11 11 11");
    }

    #[test]
    fn label_without_colon_yields_an_empty_value() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Téléphone 05 56 00 00 00</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_phone, "");
    }

    #[test]
    fn placeholder_dash_website_is_ignored() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Site internet : -</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_website, "");
    }

    #[test]
    fn stadium_address_does_not_leak_into_the_organizer_address() {
        let detail = parse(
            r#"
            <section id="infoPratique">
              <p>Adresse du stade : Piste du Lac, Talence</p>
            </section>
            "#,
        );
        assert_eq!(detail.organizer_address, "");
        assert_eq!(detail.stadium_address, "Piste du Lac, Talence");
    }

    #[test]
    fn contact_person_is_truncated_to_a_hundred_characters() {
        let long_name = "é".repeat(140);
        let html = format!(
            r#"
            <div class="club-card">
              <p>Personnes à contacter</p>
              <p>{long_name}</p>
            </div>
            "#
        );
        let detail = parse(&html);
        assert_eq!(detail.contact_person.chars().count(), 100);
    }

    #[test]
    fn contact_heading_without_a_following_line_stays_empty() {
        let detail = parse(
            r#"
            <div class="club-card">
              <p>Personnes à contacter</p>
            </div>
            "#,
        );
        assert_eq!(detail.contact_person, "");
    }

    #[test]
    fn page_without_any_known_section_parses_to_defaults() {
        let detail = parse("<html><body><p>Page introuvable</p></body></html>");
        assert_eq!(detail, CompetitionDetail::default());
        assert_eq!(detail.events_count(), 0);
    }

    #[test]
    fn events_come_back_in_document_order() {
        let detail = parse(
            r#"
            <section id="epreuves">
              <div class="club-card"><h3 class="text-normal">Perche</h3></div>
              <div class="club-card"><p>sans titre</p></div>
              <div class="club-card"><h3 class="text-normal">Javelot</h3></div>
            </section>
            "#,
        );
        assert_eq!(detail.events, vec!["Perche", "Javelot"]);
        assert_eq!(detail.events_list(), "Perche; Javelot");
    }
}
