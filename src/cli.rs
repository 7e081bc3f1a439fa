//! Command-line interface definitions.
//!
//! Every option has a default, so running with no arguments scrapes the
//! Hyderabad neighbourhoods list into `neighborhoods_data_ss.json`. Each
//! option can also come from an environment variable.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LIST_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_neighbourhoods_in_Hyderabad";
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_OUTPUT: &str = "neighborhoods_data_ss.json";

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Default list page and output file
/// wiki_neighbourhoods
///
/// # Another list page, written elsewhere
/// wiki_neighbourhoods --list-url https://en.wikipedia.org/wiki/List_of_neighbourhoods_in_Bangalore -o out/bangalore.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Wikipedia list page whose links are scraped
    #[arg(long, env = "NEIGHBOURHOODS_LIST_URL", default_value = DEFAULT_LIST_URL)]
    pub list_url: String,

    /// Origin that relative place links are resolved against
    #[arg(long, env = "NEIGHBOURHOODS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path of the JSON file to write
    #[arg(short, long, env = "NEIGHBOURHOODS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wiki_neighbourhoods"]);

        assert_eq!(cli.list_url, DEFAULT_LIST_URL);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.output, PathBuf::from("neighborhoods_data_ss.json"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "wiki_neighbourhoods",
            "--list-url",
            "https://en.wikipedia.org/wiki/List_of_neighbourhoods_in_Chennai",
            "-o",
            "/tmp/chennai.json",
        ]);

        assert_eq!(
            cli.list_url,
            "https://en.wikipedia.org/wiki/List_of_neighbourhoods_in_Chennai"
        );
        assert_eq!(cli.output, PathBuf::from("/tmp/chennai.json"));
    }
}
