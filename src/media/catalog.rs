//! Known release-name noise tokens.

use itertools::Itertools;

const RESOLUTION: [&str; 4] = ["480p", "720p", "1080p", "2160p"];

const SOURCE_FORMAT: [&str; 8] = ["BluRay", "Bluray", "Web-DL", "WEB-DL", "WebRip", "WEBRip", "AMZN", "WEB"];

const ENCODING: [&str; 15] = [
    "X264", "x264", "h264", "H264", "h.264", "H.264", "x265", "X265", "H.265", "h.265", "DD5.1", "DD.5.1", "AAC",
    "DTS-HDC", "DDP5.1",
];

const PUBLISHER_TAG: [&str; 9] = [
    "-RARBG",
    "-FGT",
    "-DIMENSION",
    "-DRONES",
    "-FOCUS",
    "-SiGMA",
    "[rartv]",
    "[rarbg]",
    "-DEFLATE",
];

/// Noise token categories, in the order they are stripped from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Resolution,
    SourceFormat,
    Encoding,
    PublisherTag,
}

/// Classified lists of literal noise tokens.
///
/// Built once and shared read-only by the normalizer and classifier.
/// Token order inside a category is significant:
/// a token must be listed before any shorter token it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCatalog {
    resolution: Vec<String>,
    source_format: Vec<String>,
    encoding: Vec<String>,
    publisher_tag: Vec<String>,
}

impl TokenCategory {
    /// All categories in stripping order.
    pub const ALL: [Self; 4] = [Self::Resolution, Self::SourceFormat, Self::Encoding, Self::PublisherTag];
}

impl TokenCatalog {
    /// Create a catalog from explicit token lists.
    #[must_use]
    pub fn new(
        resolution: Vec<String>,
        source_format: Vec<String>,
        encoding: Vec<String>,
        publisher_tag: Vec<String>,
    ) -> Self {
        Self {
            resolution,
            source_format,
            encoding,
            publisher_tag,
        }
    }

    /// Tokens for the given category.
    #[must_use]
    pub fn tokens(&self, category: TokenCategory) -> &[String] {
        match category {
            TokenCategory::Resolution => &self.resolution,
            TokenCategory::SourceFormat => &self.source_format,
            TokenCategory::Encoding => &self.encoding,
            TokenCategory::PublisherTag => &self.publisher_tag,
        }
    }

    /// Iterate over every token of every category.
    pub fn all_tokens(&self) -> impl Iterator<Item = &str> {
        TokenCategory::ALL
            .into_iter()
            .flat_map(|category| self.tokens(category).iter().map(String::as_str))
    }

    /// Return a new catalog with extra tokens appended to each category.
    ///
    /// Empty strings and tokens already present are dropped.
    #[must_use]
    pub fn extended(
        mut self,
        resolution: &[String],
        source_format: &[String],
        encoding: &[String],
        publisher_tag: &[String],
    ) -> Self {
        Self::extend_unique(&mut self.resolution, resolution);
        Self::extend_unique(&mut self.source_format, source_format);
        Self::extend_unique(&mut self.encoding, encoding);
        Self::extend_unique(&mut self.publisher_tag, publisher_tag);
        self
    }

    fn extend_unique(tokens: &mut Vec<String>, extra: &[String]) {
        let merged = tokens
            .drain(..)
            .chain(extra.iter().map(|token| token.trim().to_string()))
            .filter(|token| !token.is_empty())
            .unique()
            .collect();
        *tokens = merged;
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        let owned = |tokens: &[&str]| tokens.iter().map(|&token| token.to_string()).collect::<Vec<_>>();
        Self {
            resolution: owned(&RESOLUTION),
            source_format: owned(&SOURCE_FORMAT),
            encoding: owned(&ENCODING),
            publisher_tag: owned(&PUBLISHER_TAG),
        }
    }
}

#[cfg(test)]
mod token_catalog_tests {
    use super::*;

    #[test]
    fn default_catalog_has_every_category() {
        let catalog = TokenCatalog::default();
        for category in TokenCategory::ALL {
            assert!(!catalog.tokens(category).is_empty(), "{category:?} should not be empty");
        }
    }

    #[test]
    fn default_tokens_are_not_concatenated() {
        let catalog = TokenCatalog::default();
        assert!(catalog.tokens(TokenCategory::Encoding).contains(&"H.264".to_string()));
        assert!(catalog.tokens(TokenCategory::Encoding).contains(&"x265".to_string()));
        assert!(!catalog.all_tokens().any(|token| token == "H.264x265"));
    }

    #[test]
    fn extended_appends_in_order() {
        let catalog = TokenCatalog::default().extended(&[], &["HDTV".to_string()], &[], &["-YIFY".to_string()]);
        assert_eq!(
            catalog.tokens(TokenCategory::SourceFormat).last(),
            Some(&"HDTV".to_string())
        );
        assert_eq!(
            catalog.tokens(TokenCategory::PublisherTag).last(),
            Some(&"-YIFY".to_string())
        );
    }

    #[test]
    fn extended_skips_duplicates_and_empty() {
        let catalog = TokenCatalog::default().extended(&["720p".to_string(), "  ".to_string()], &[], &[], &[]);
        assert_eq!(catalog.tokens(TokenCategory::Resolution), TokenCatalog::default().tokens(TokenCategory::Resolution));
    }

    #[test]
    fn all_tokens_covers_every_category() {
        let catalog = TokenCatalog::new(
            vec!["720p".to_string()],
            vec!["WEB".to_string()],
            vec!["x264".to_string()],
            vec!["-GRP".to_string()],
        );
        assert_eq!(catalog.all_tokens().collect::<Vec<_>>(), vec!["720p", "WEB", "x264", "-GRP"]);
    }
}
