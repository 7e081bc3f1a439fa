//! JSON output.
//!
//! The whole run is written once, at the end, as a single pretty-printed
//! array of [`PlaceRecord`] objects:
//!
//! ```text
//! [
//!     {
//!         "placeName": "Ameerpet",
//!         "placeType": "Neighborhood",
//!         ...
//!     }
//! ]
//! ```
//!
//! Indentation is four spaces. Non-ASCII text (Telugu and Urdu names,
//! `°`) is written as literal UTF-8, not `\u` escapes.

use crate::models::PlaceRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const INDENT: &[u8] = b"    ";

/// Serialize `places` as a pretty-printed JSON array.
pub fn to_pretty_json(places: &[PlaceRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    places.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `places` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = places.len()))]
pub async fn write_places(places: &[PlaceRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = to_pretty_json(places)?;
    info!(bytes = json.len(), "Writing JSON");
    fs::write(path, json).await?;
    info!("Wrote places JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminDetails;

    fn record(name: &str) -> PlaceRecord {
        let mut details = AdminDetails::default();
        details.set("State", "తెలంగాణ".to_string());
        PlaceRecord::new(name.to_string(), 17.385, 78.4867, details, Vec::new())
    }

    #[test]
    fn test_four_space_indent_and_literal_unicode() {
        let json = String::from_utf8(to_pretty_json(&[record("Charminar")]).unwrap()).unwrap();
        assert!(json.starts_with("[\n    {\n        \"placeName\": \"Charminar\""));
        assert!(json.contains("\"state\": \"తెలంగాణ\""));
        assert!(!json.contains("\\u"));
        assert!(json.contains("\"imageUrls\": []"));
    }

    #[test]
    fn test_empty_run_writes_empty_array() {
        assert_eq!(to_pretty_json(&[]).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_write_places_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neighborhoods.json");
        let places = vec![record("Charminar"), record("Ameerpet")];

        write_places(&places, &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<PlaceRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, places);
    }
}
