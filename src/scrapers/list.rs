//! Wikipedia list page walker.
//!
//! A list page groups place links under `h3` section headings:
//!
//! ```text
//! <h3>Zone A</h3>
//! <ul><li><a href="/wiki/Ameerpet">Ameerpet</a></li> ...</ul>
//! ```
//!
//! [`discover_links`] pairs every link with the nearest preceding heading
//! (`"N/A"` before the first one). [`walk`] then scrapes each linked page in
//! order and stamps the heading onto the record's `region`.

use crate::fetch::FetchPage;
use crate::models::{NOT_AVAILABLE, PlaceLink, PlaceRecord};
use crate::scrapers::place::fetch_place;
use crate::utils::element_text;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

static SECTION_OR_LIST: Lazy<Selector> = Lazy::new(|| sel("h3, ul"));
static ITEM: Lazy<Selector> = Lazy::new(|| sel("li"));
static LINK: Lazy<Selector> = Lazy::new(|| sel("a[href]"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Scrape every place linked from the list page at `list_url`.
///
/// Links are resolved against `base_url`. Pages that fail to produce a
/// record are skipped.
///
/// # Errors
///
/// Fails only when the list page itself cannot be fetched or `base_url` is
/// not a valid URL.
#[instrument(level = "info", skip(fetcher))]
pub async fn walk<F: FetchPage>(
    fetcher: &F,
    list_url: &str,
    base_url: &str,
) -> Result<Vec<PlaceRecord>, Box<dyn Error>> {
    let base = Url::parse(base_url)?;
    let html = fetcher.fetch(list_url).await?;
    let links = discover_links(&Html::parse_document(&html), &base);
    info!(count = links.len(), source = list_url, "Indexed place links");

    let records: Vec<PlaceRecord> = stream::iter(links.iter())
        .then(|link| async move {
            info!(place = %link.name, region = %link.region, "Processing place");
            let Some(mut record) = fetch_place(fetcher, &link.url).await else {
                return None;
            };
            record.region = link.region.clone();
            Some(record)
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    let per_region = records.iter().counts_by(|r| r.region.clone());
    debug!(?per_region, "Places per region");
    info!(
        discovered = links.len(),
        added = records.len(),
        skipped = links.len() - records.len(),
        "Finished scraping places"
    );

    Ok(records)
}

/// Collect `(region, name, url)` for every list link, in document order.
///
/// Headings and lists are visited in document order; each `h3` replaces the
/// current region. Within each `ul`, every `li` descendant contributes its
/// first `a[href]` if the link text is not blank. A nested `ul` is scanned
/// both as part of its parent and on its own, so its links repeat.
pub fn discover_links(document: &Html, base: &Url) -> Vec<PlaceLink> {
    let (_, links) = document.select(&SECTION_OR_LIST).fold(
        (NOT_AVAILABLE.to_string(), Vec::new()),
        |(region, mut links), element| match element.value().name() {
            "h3" => (element_text(element), links),
            _ => {
                links.extend(list_links(element, &region, base));
                (region, links)
            }
        },
    );
    links
}

fn list_links<'a>(
    list: ElementRef<'a>,
    region: &'a str,
    base: &'a Url,
) -> impl Iterator<Item = PlaceLink> + 'a {
    list.select(&ITEM)
        .filter_map(|item| item.select(&LINK).next())
        .filter_map(move |link| {
            let name = element_text(link);
            if name.is_empty() {
                return None;
            }
            let href = link.value().attr("href")?;
            let url = base.join(href).ok()?;
            Some(PlaceLink {
                region: region.to_string(),
                name,
                url: url.into(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticPages;

    const BASE: &str = "https://en.wikipedia.org";

    fn base() -> Url {
        Url::parse(BASE).unwrap()
    }

    fn place_page(name: &str, geo: &str) -> String {
        format!(
            r#"<html><body><h1 id="firstHeading">{name}</h1>
            <span class="geo">{geo}</span></body></html>"#
        )
    }

    #[test]
    fn test_links_take_nearest_preceding_heading() {
        let html = r#"<html><body>
            <ul><li><a href="/wiki/Early">Early</a></li></ul>
            <h3>Zone A</h3>
            <ul>
                <li><a href="/wiki/Ameerpet">Ameerpet</a></li>
                <li><a href="/wiki/Begumpet">Begumpet</a> (part)</li>
            </ul>
            <div class="mw-heading"><h3> Zone B </h3></div>
            <ul><li><a href="/wiki/Charminar">Charminar</a></li></ul>
        </body></html>"#;
        let links = discover_links(&Html::parse_document(html), &base());
        let got: Vec<(&str, &str, &str)> = links
            .iter()
            .map(|l| (l.region.as_str(), l.name.as_str(), l.url.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("N/A", "Early", "https://en.wikipedia.org/wiki/Early"),
                ("Zone A", "Ameerpet", "https://en.wikipedia.org/wiki/Ameerpet"),
                ("Zone A", "Begumpet", "https://en.wikipedia.org/wiki/Begumpet"),
                ("Zone B", "Charminar", "https://en.wikipedia.org/wiki/Charminar"),
            ]
        );
    }

    #[test]
    fn test_blank_and_hrefless_links_skipped() {
        let html = r#"<h3>Zone A</h3><ul>
            <li><a href="/wiki/Blank">  </a></li>
            <li><a name="anchor">No href</a></li>
            <li>Plain text</li>
            <li><a href="/wiki/Kept">Kept</a></li>
        </ul>"#;
        let links = discover_links(&Html::parse_document(html), &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Kept");
    }

    #[test]
    fn test_nested_list_links_repeat() {
        let html = r#"<h3>Zone A</h3><ul>
            <li><a href="/wiki/Outer">Outer</a>
                <ul><li><a href="/wiki/Inner">Inner</a></li></ul>
            </li>
        </ul>"#;
        let names: Vec<String> = discover_links(&Html::parse_document(html), &base())
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Outer", "Inner", "Inner"]);
    }

    #[test]
    fn test_absolute_hrefs_kept() {
        let html = r#"<ul><li><a href="https://example.org/x">X</a></li></ul>"#;
        let links = discover_links(&Html::parse_document(html), &base());
        assert_eq!(links[0].url, "https://example.org/x");
    }

    #[tokio::test]
    async fn test_walk_single_zone() {
        let list = r#"<html><body><h3>Zone A</h3>
            <ul><li><a href="/wiki/Place_One">Place One</a></li></ul></body></html>"#;
        let pages = StaticPages::default()
            .with_page("https://en.wikipedia.org/wiki/List", list)
            .with_page(
                "https://en.wikipedia.org/wiki/Place_One",
                &place_page("Place One", "17.385; 78.4867"),
            );

        let records = walk(&pages, "https://en.wikipedia.org/wiki/List", BASE)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "Zone A");
        assert!((records[0].latitude - 17.385).abs() < 1e-9);
        assert!((records[0].longitude - 78.4867).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_walk_skips_failed_places_and_keeps_order() {
        let list = r#"<ul><li><a href="/wiki/First">First</a></li></ul>
            <h3>North</h3>
            <ul>
                <li><a href="/wiki/Unreachable">Unreachable</a></li>
                <li><a href="/wiki/No_Coords">No Coords</a></li>
                <li><a href="/wiki/Second">Second</a></li>
            </ul>
            <h3>South</h3>
            <ul><li><a href="/wiki/Third">Third</a></li></ul>"#;
        let infobox_region = r#"<h1 id="firstHeading">Third</h1>
            <span class="geo">-1.0; -2.0</span>
            <table class="infobox ib-settlement vcard">
                <tr><th>Region</th><td>Somewhere else</td></tr>
            </table>"#;
        let pages = StaticPages::default()
            .with_page("https://en.wikipedia.org/wiki/List", list)
            .with_page("https://en.wikipedia.org/wiki/First", &place_page("First", "1.0; 2.0"))
            .with_page(
                "https://en.wikipedia.org/wiki/No_Coords",
                "<h1 id=\"firstHeading\">No Coords</h1>",
            )
            .with_page("https://en.wikipedia.org/wiki/Second", &place_page("Second", "3.0; 4.0"))
            .with_page("https://en.wikipedia.org/wiki/Third", infobox_region);

        let records = walk(&pages, "https://en.wikipedia.org/wiki/List", BASE)
            .await
            .unwrap();
        let got: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.place_name.as_str(), r.region.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("First", "N/A"), ("Second", "North"), ("Third", "South")]
        );
    }

    #[tokio::test]
    async fn test_walk_fails_when_list_page_missing() {
        let pages = StaticPages::default();
        assert!(walk(&pages, "https://en.wikipedia.org/wiki/List", BASE)
            .await
            .is_err());
    }
}
