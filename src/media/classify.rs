use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::media::TokenCatalog;

/// "S" followed by exactly two digits.
pub(crate) static RE_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S([0-9]{2})(?:[^0-9]|$)").expect("Failed to compile season marker regex"));

/// Kind of release a top-level folder holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Show,
    Movie,
}

/// Decides which folders are media releases.
///
/// Works on raw names, so it must run before normalization removes the tokens it looks for.
#[derive(Debug, Clone, Default)]
pub struct MediaClassifier {
    catalog: TokenCatalog,
    lowercase_tokens: Vec<String>,
}

impl MediaClassifier {
    #[must_use]
    pub fn new(catalog: TokenCatalog) -> Self {
        let lowercase_tokens = catalog.all_tokens().map(str::to_lowercase).collect();
        Self {
            catalog,
            lowercase_tokens,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    /// True if the name contains any known noise token, ignoring case.
    #[must_use]
    pub fn is_media_folder(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.lowercase_tokens.iter().any(|token| name.contains(token.as_str()))
    }

    /// True if the name contains a season marker.
    #[must_use]
    pub fn is_tv_show(name: &str) -> bool {
        RE_SEASON.is_match(name)
    }

    /// Classify a raw folder name, returning `None` for non-release folders.
    #[must_use]
    pub fn classify(&self, name: &str) -> Option<MediaKind> {
        if !self.is_media_folder(name) {
            return None;
        }
        if Self::is_tv_show(name) {
            Some(MediaKind::Show)
        } else {
            Some(MediaKind::Movie)
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "Show"),
            Self::Movie => write!(f, "Movie"),
        }
    }
}
