//! Wikipedia place article scraper.
//!
//! Turns one article into a [`PlaceRecord`]:
//!
//! - name from the `h1#firstHeading` page title
//! - coordinates from the `span.geo` microformat, falling back to the
//!   `span.latitude` / `span.longitude` pair
//! - administrative rows from the settlement infobox
//! - every non-SVG `img` on the page
//!
//! A page without usable coordinates produces no record.

use crate::coordinates;
use crate::fetch::FetchPage;
use crate::models::{AdminDetails, NOT_AVAILABLE, PlaceRecord};
use crate::utils::element_text;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

static HEADING: Lazy<Selector> = Lazy::new(|| sel("h1#firstHeading"));
static GEO: Lazy<Selector> = Lazy::new(|| sel("span.geo"));
static LATITUDE: Lazy<Selector> = Lazy::new(|| sel("span.latitude"));
static LONGITUDE: Lazy<Selector> = Lazy::new(|| sel("span.longitude"));
static INFOBOX: Lazy<Selector> = Lazy::new(|| sel("table.infobox.ib-settlement.vcard"));
static ROW: Lazy<Selector> = Lazy::new(|| sel("tr"));
static ROW_KEY: Lazy<Selector> = Lazy::new(|| sel("th"));
static ROW_VALUE: Lazy<Selector> = Lazy::new(|| sel("td"));
static IMAGE: Lazy<Selector> = Lazy::new(|| sel("img[src]"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Why a place page produced no record.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no coordinates for {place}")]
    MissingCoordinates { place: String },
    #[error("malformed geo coordinates {text:?}")]
    MalformedGeo { text: String },
}

/// Fetch and extract one place page.
///
/// Any failure (request, HTTP status, missing coordinates) is logged and
/// turned into `None` so one bad page never stops the run.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_place<F: FetchPage>(fetcher: &F, url: &str) -> Option<PlaceRecord> {
    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%url, error = %e, "Place fetch failed");
            return None;
        }
    };

    let document = Html::parse_document(&body);
    match extract_place(&document, url) {
        Ok(record) => {
            info!(
                place = %record.place_name,
                latitude = record.latitude,
                longitude = record.longitude,
                "Added place"
            );
            Some(record)
        }
        Err(e @ ExtractError::MissingCoordinates { .. }) => {
            info!(%url, reason = %e, "Skipping place");
            None
        }
        Err(e) => {
            warn!(%url, error = %e, "Place extraction failed");
            None
        }
    }
}

/// Extract a [`PlaceRecord`] from a parsed place article.
///
/// `page_url` is only used for diagnostics. The returned record's `region`
/// comes from the infobox; the list walker replaces it with the section
/// heading.
pub fn extract_place(document: &Html, page_url: &str) -> Result<PlaceRecord, ExtractError> {
    let place_name = document
        .select(&HEADING)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let (latitude, longitude) = match extract_coordinates(document)? {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(ExtractError::MissingCoordinates { place: place_name }),
    };

    let details = extract_admin_details(document);
    let image_urls = extract_image_urls(document, page_url);
    tracing::debug!(
        url = page_url,
        images = image_urls.len(),
        ?details,
        "Extracted place details"
    );

    Ok(PlaceRecord::new(place_name, latitude, longitude, details, image_urls))
}

/// Latitude and longitude from the geo microformat or the DMS pair.
///
/// A present but unparsable geo element is an error; it does not fall back.
fn extract_coordinates(document: &Html) -> Result<(Option<f64>, Option<f64>), ExtractError> {
    if let Some(geo) = document.select(&GEO).next() {
        let text = geo.text().collect::<String>();
        let malformed = || ExtractError::MalformedGeo { text: text.clone() };
        let (lat, lon) = text.split_once(';').ok_or_else(malformed)?;
        let lat = coordinates::parse_decimal(lat).ok_or_else(malformed)?;
        let lon = coordinates::parse_decimal(lon).ok_or_else(malformed)?;
        return Ok((Some(lat), Some(lon)));
    }

    let first_text = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>())
    };
    let lat = coordinates::parse(first_text(&*LATITUDE).as_deref());
    let lon = coordinates::parse(first_text(&*LONGITUDE).as_deref());
    Ok((lat, lon))
}

/// Recognized key/value rows of the settlement infobox.
pub fn extract_admin_details(document: &Html) -> AdminDetails {
    let mut details = AdminDetails::default();
    let Some(infobox) = document.select(&INFOBOX).next() else {
        return details;
    };

    for row in infobox.select(&ROW) {
        let (Some(key), Some(value)) = (first(row, &ROW_KEY), first(row, &ROW_VALUE)) else {
            continue;
        };
        details.set(&element_text(key), element_text(value));
    }
    details
}

fn first<'a>(row: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    row.select(selector).next()
}

/// Image sources in document order, empty sources and SVGs dropped.
///
/// Protocol-relative `//` sources get an `https:` prefix. Other relative
/// sources are resolved against `page_url` when it is a valid URL.
pub fn extract_image_urls(document: &Html, page_url: &str) -> Vec<String> {
    let base = Url::parse(page_url).ok();
    document
        .select(&IMAGE)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty() && !src.ends_with(".svg"))
        .map(|src| {
            if src.starts_with("//") {
                return format!("https:{src}");
            }
            base.as_ref()
                .and_then(|base| base.join(src).ok())
                .map(String::from)
                .unwrap_or_else(|| src.to_string())
        })
        .collect()
}
