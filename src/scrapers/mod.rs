//! Wikipedia scrapers.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: [`list::discover_links`] reads the list page and pairs each
//!    place link with its section heading
//! 2. **Fetching**: [`place::fetch_place`] downloads one article and extracts a
//!    [`PlaceRecord`](crate::models::PlaceRecord)
//!
//! [`list::walk`] drives both phases one page at a time. A failed place page is
//! logged and skipped; only a failed list page ends the run.

pub mod list;
pub mod place;
