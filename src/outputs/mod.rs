//! Output generation.
//!
//! - [`json`]: writes the collected places as one JSON array
//!
//! ```text
//! neighborhoods_data_ss.json   # default output path
//! ```

pub mod json;
