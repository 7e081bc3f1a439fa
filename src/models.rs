//! Data models for scraped places.
//!
//! - [`PlaceRecord`]: one place as written to the output JSON
//! - [`AdminDetails`]: administrative rows read from a settlement infobox
//! - [`PlaceLink`]: a place link discovered on the list page
//!
//! The output uses camelCase field names, hence `#[serde(rename_all)]` on
//! [`PlaceRecord`].

use serde::{Deserialize, Serialize};

/// Placeholder for any attribute that a page does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Every record is written with this place type.
pub const PLACE_TYPE: &str = "Neighborhood";

/// A fully extracted place.
///
/// Field order matches the order of keys in the output JSON objects. The
/// program only writes records; `Deserialize` lets tests read output back.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Page heading, or `"N/A"` when the page has none.
    pub place_name: String,
    /// Always [`PLACE_TYPE`].
    pub place_type: String,
    pub country: String,
    pub state: String,
    /// Replaced by the list-page section heading once the record reaches the walker.
    pub region: String,
    pub district: String,
    pub pincode: String,
    pub lok_sabha_constituency: String,
    pub vidhan_sabha_constituency: String,
    /// Absolute image URLs in document order, SVGs excluded.
    pub image_urls: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceRecord {
    /// Build a record from its extracted parts, filling absent attributes with `"N/A"`.
    pub fn new(
        place_name: String,
        latitude: f64,
        longitude: f64,
        details: AdminDetails,
        image_urls: Vec<String>,
    ) -> Self {
        let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            place_name,
            place_type: PLACE_TYPE.to_string(),
            country: or_na(details.country),
            state: or_na(details.state),
            region: or_na(details.region),
            district: or_na(details.district),
            pincode: or_na(details.pincode),
            lok_sabha_constituency: or_na(details.lok_sabha_constituency),
            vidhan_sabha_constituency: or_na(details.vidhan_sabha_constituency),
            image_urls,
            latitude,
            longitude,
        }
    }
}

/// Administrative attributes found in an infobox. `None` means the row was absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AdminDetails {
    pub country: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub pincode: Option<String>,
    pub lok_sabha_constituency: Option<String>,
    pub vidhan_sabha_constituency: Option<String>,
}

impl AdminDetails {
    /// Store `value` under the field that `key` names.
    ///
    /// Returns `false` and stores nothing when `key` is not one of the
    /// recognized infobox labels. Keys must match exactly.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "Country" => &mut self.country,
            "State" => &mut self.state,
            "Region" => &mut self.region,
            "District" => &mut self.district,
            "PIN" => &mut self.pincode,
            "Parliament constituencies" => &mut self.lok_sabha_constituency,
            "Sasana Sabha constituencies" => &mut self.vidhan_sabha_constituency,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// A place link found on the list page, with the section it was listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLink {
    pub region: String,
    pub name: String,
    pub url: String,
}
