//! Configuration for media folder organizing.

use std::{fmt, fs};

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use crate::media::{TokenCatalog, TokenCategory};
use crate::print_error;

const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "mkv"];
const SHOW_JUNK_EXTENSIONS: [&str; 1] = ["txt"];
const MOVIE_JUNK_EXTENSIONS: [&str; 2] = ["txt", "exe"];

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct MediaTidyConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub resolution: Vec<String>,
    #[serde(default)]
    pub source_format: Vec<String>,
    #[serde(default)]
    pub encoding: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub video_extensions: Vec<String>,
    #[serde(default)]
    pub junk_extensions: Vec<String>,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    mediatidy: MediaTidyConfig,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: TokenCatalog,
    pub debug: bool,
    pub dryrun: bool,
    /// Lowercase extensions without the leading dot.
    pub video_extensions: Vec<String>,
    pub show_junk_extensions: Vec<String>,
    pub movie_junk_extensions: Vec<String>,
    pub overwrite: bool,
    pub verbose: bool,
}

impl MediaTidyConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    #[must_use]
    pub fn get_user_config() -> Self {
        crate::config::CONFIG_PATH
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| {
                fs::read_to_string(path)
                    .map_err(|e| {
                        print_error!("Error reading config file {}: {e}", path.display());
                    })
                    .ok()
            })
            .and_then(|config_string| {
                Self::from_toml_str(&config_string)
                    .map_err(|e| print_error!("{e:#}"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.mediatidy)
            .with_context(|| "Failed to parse config TOML")
    }
}

impl Config {
    /// Build the final config from user config values.
    #[must_use]
    pub fn from_user_config(user_config: MediaTidyConfig) -> Self {
        let catalog = TokenCatalog::default().extended(
            &user_config.resolution,
            &user_config.source_format,
            &user_config.encoding,
            &user_config.publisher,
        );
        Self {
            catalog,
            debug: user_config.debug,
            dryrun: user_config.dryrun,
            video_extensions: merge_extensions(&VIDEO_EXTENSIONS, &user_config.video_extensions),
            show_junk_extensions: merge_extensions(&SHOW_JUNK_EXTENSIONS, &user_config.junk_extensions),
            movie_junk_extensions: merge_extensions(&MOVIE_JUNK_EXTENSIONS, &user_config.junk_extensions),
            overwrite: user_config.overwrite,
            verbose: user_config.verbose,
        }
    }

    /// True if the lowercase extension is a recognized video extension.
    #[must_use]
    pub fn is_video_extension(&self, extension: &str) -> bool {
        self.video_extensions.iter().any(|ext| ext == extension)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_user_config(MediaTidyConfig::default())
    }
}

/// Combine default and user extensions as lowercase strings without a leading dot.
fn merge_extensions(defaults: &[&str], extra: &[String]) -> Vec<String> {
    defaults
        .iter()
        .map(|&ext| ext.to_string())
        .chain(extra.iter().map(|ext| ext.trim().trim_start_matches('.').to_lowercase()))
        .filter(|ext| !ext.is_empty())
        .unique()
        .collect()
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  debug:     {}", crate::colorize_bool(self.debug))?;
        writeln!(f, "  dryrun:    {}", crate::colorize_bool(self.dryrun))?;
        writeln!(f, "  overwrite: {}", crate::colorize_bool(self.overwrite))?;
        writeln!(f, "  verbose:   {}", crate::colorize_bool(self.verbose))?;
        writeln!(f, "  video:     [{}]", self.video_extensions.join(", "))?;
        writeln!(f, "  junk show: [{}]", self.show_junk_extensions.join(", "))?;
        writeln!(f, "  junk movie: [{}]", self.movie_junk_extensions.join(", "))?;
        for category in TokenCategory::ALL {
            writeln!(
                f,
                "  {category:?}: [{}]",
                self.catalog.tokens(category).iter().join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod media_tidy_config_tests {
    use super::*;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let config = MediaTidyConfig::from_toml_str("").expect("should parse empty config");
        assert!(!config.debug);
        assert!(!config.dryrun);
        assert!(!config.overwrite);
        assert!(!config.verbose);
        assert!(config.publisher.is_empty());
        assert!(config.video_extensions.is_empty());
    }

    #[test]
    fn from_toml_str_parses_mediatidy_section() {
        let toml = r"
[mediatidy]
debug = true
dryrun = true
overwrite = true
verbose = true
";
        let config = MediaTidyConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.debug);
        assert!(config.dryrun);
        assert!(config.overwrite);
        assert!(config.verbose);
    }

    #[test]
    fn from_toml_str_parses_token_lists() {
        let toml = r#"
[mediatidy]
resolution = ["576p"]
source_format = ["HDTV", "NF"]
encoding = ["HEVC"]
publisher = ["-YIFY"]
"#;
        let config = MediaTidyConfig::from_toml_str(toml).expect("should parse config");
        assert_eq!(config.resolution, vec!["576p"]);
        assert_eq!(config.source_format, vec!["HDTV", "NF"]);
        assert_eq!(config.encoding, vec!["HEVC"]);
        assert_eq!(config.publisher, vec!["-YIFY"]);
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r#"
[dirlist]
output = "list.txt"

[mediatidy]
verbose = true
"#;
        let config = MediaTidyConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        assert!(MediaTidyConfig::from_toml_str("this is not valid toml {{{").is_err());
    }
}
