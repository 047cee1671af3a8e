//! Release name normalization.
//!
//! Turns a noisy release name like `The.Matrix.1999.1080p.BluRay.x264-RARBG`
//! into a canonical title (`The Matrix`).
//! Each token category is a separate stage and the stages always run in the same order.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::media::{TokenCatalog, TokenCategory};

/// Greedy match so the captured year is the right-most candidate.
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*([1-3][0-9]{3})").expect("Failed to compile release year regex"));

static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._]+").expect("Failed to compile separator regex"));

/// Strips release noise from folder and file names.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    catalog: TokenCatalog,
}

impl NameNormalizer {
    #[must_use]
    pub const fn new(catalog: TokenCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    /// Normalize the name of an entry inside `parent`.
    ///
    /// If `parent/name` is an existing file, its extension is stripped before normalizing.
    /// Directory names and names that do not exist on disk keep their extension.
    /// The name is read in composed Unicode form.
    #[must_use]
    pub fn normalize_entry(&self, parent: &Path, name: &str) -> String {
        let path = parent.join(name);
        let base = if path.is_file() {
            crate::get_normalized_file_name_and_extension(&path).map(|(stem, _)| stem)
        } else {
            crate::get_normalized_dir_name(&path)
        };
        self.normalize(&base.unwrap_or_else(|_| name.nfc().collect()))
    }

    /// Produce the canonical title for a raw name.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let name = self.remove_resolution(raw);
        let name = self.remove_source_format(&name);
        let name = self.remove_encoding(&name);
        let name = self.remove_publisher_tag(&name);
        let name = remove_year(&name);
        let name = replace_separators(&name);
        name.trim().to_string()
    }

    fn remove_resolution(&self, name: &str) -> String {
        remove_exact(name, self.catalog.tokens(TokenCategory::Resolution))
    }

    fn remove_source_format(&self, name: &str) -> String {
        remove_dual_case(name, self.catalog.tokens(TokenCategory::SourceFormat))
    }

    fn remove_encoding(&self, name: &str) -> String {
        remove_dual_case(name, self.catalog.tokens(TokenCategory::Encoding))
    }

    fn remove_publisher_tag(&self, name: &str) -> String {
        remove_exact(name, self.catalog.tokens(TokenCategory::PublisherTag))
    }
}

/// Remove exact occurrences of each token.
fn remove_exact(name: &str, tokens: &[String]) -> String {
    tokens
        .iter()
        .fold(name.to_string(), |name, token| name.replace(token.as_str(), ""))
}

/// Remove both the lowercase and the original-case occurrences of each token.
fn remove_dual_case(name: &str, tokens: &[String]) -> String {
    tokens.iter().fold(name.to_string(), |name, token| {
        if name.to_lowercase().contains(&token.to_lowercase()) {
            name.replace(&token.to_lowercase(), "").replace(token.as_str(), "")
        } else {
            name
        }
    })
}

/// Remove the right-most four digit run starting with 1, 2 or 3.
fn remove_year(name: &str) -> String {
    match RE_YEAR.captures(name).and_then(|captures| captures.get(1)) {
        Some(year) => format!("{}{}", &name[..year.start()], &name[year.end()..]),
        None => name.to_string(),
    }
}

fn replace_separators(name: &str) -> String {
    RE_SEPARATORS.replace_all(name, " ").into_owned()
}
