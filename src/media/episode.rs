//! Season and episode parsing for normalized names.

use std::sync::LazyLock;

use regex::Regex;

use crate::media::classify::RE_SEASON;

static RE_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S([0-9]{2})E([0-9]{2})").expect("Failed to compile episode marker regex"));

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Show title and season folder name parsed from a normalized folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonInfo {
    pub title: String,
    pub number: u32,
    pub label: String,
}

/// Episode information parsed from a normalized file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInfo {
    /// File name (without extension) after inserting the title separator.
    pub file_name: String,
    /// Name of the directory the file is grouped under.
    pub folder_key: String,
    /// Season and episode numbers, if the name had a marker.
    pub code: Option<(u32, u32)>,
    /// Trailing episode title, without the separator.
    pub title: Option<String>,
}

/// Locate the left-most season marker, remove it from the title and build the season label.
///
/// Returns `None` if the name has no season marker.
#[must_use]
pub fn extract_season(normalized: &str) -> Option<SeasonInfo> {
    let captures = RE_SEASON.captures(normalized)?;
    let digits = captures.get(1)?;
    let number: u32 = digits.as_str().parse().ok()?;
    // Marker is the "S" plus its two digits.
    let marker_start = digits.start() - 1;
    let without_marker = format!("{}{}", &normalized[..marker_start], &normalized[digits.end()..]);
    let title = RE_WHITESPACE.replace_all(without_marker.trim(), " ").into_owned();
    Some(SeasonInfo {
        title,
        number,
        label: season_label(number),
    })
}

/// Split a normalized file name into the renamed file, its episode folder and episode title.
///
/// Files without a marker keep their name and use it as the folder key.
#[must_use]
pub fn extract_episode(normalized: &str) -> EpisodeInfo {
    let Some((marker_end, code)) = find_episode_marker(normalized) else {
        return EpisodeInfo {
            file_name: normalized.to_string(),
            folder_key: normalized.to_string(),
            code: None,
            title: None,
        };
    };

    let base = normalized[..marker_end].trim_end();
    let fragment = normalized[marker_end..].trim();

    if fragment.is_empty() {
        return EpisodeInfo {
            file_name: base.to_string(),
            folder_key: base.to_string(),
            code: Some(code),
            title: None,
        };
    }

    let (file_name, title) = fragment.strip_prefix('-').map_or_else(
        || (format!("{base}- {fragment}"), fragment.to_string()),
        |rest| (normalized.trim().to_string(), rest.trim().to_string()),
    );

    EpisodeInfo {
        file_name,
        folder_key: base.to_string(),
        code: Some(code),
        title: Some(title).filter(|title| !title.is_empty()),
    }
}

/// End position and season/episode numbers of the left-most episode marker.
fn find_episode_marker(name: &str) -> Option<(usize, (u32, u32))> {
    let captures = RE_EPISODE.captures(name)?;
    let season = captures.get(1)?.as_str().parse().ok()?;
    let episode = captures.get(2)?.as_str().parse().ok()?;
    Some((captures.get(0)?.end(), (season, episode)))
}

/// Folder name for a season number.
#[must_use]
pub fn season_label(number: u32) -> String {
    format!("Season {number}")
}


#[cfg(test)]
mod episode_tests {
    use super::*;

    #[test]
    fn inserts_dash_before_title() {
        let episode = extract_episode("Show S01E02 Title");
        assert_eq!(episode.file_name, "Show S01E02- Title");
        assert_eq!(episode.folder_key, "Show S01E02");
        assert_eq!(episode.title.as_deref(), Some("Title"));
        assert_eq!(episode.code, Some((1, 2)));
    }

    #[test]
    fn keeps_existing_dash() {
        let episode = extract_episode("Show S01E02 - Title");
        assert_eq!(episode.file_name, "Show S01E02 - Title");
        assert_eq!(episode.folder_key, "Show S01E02");
        assert_eq!(episode.title.as_deref(), Some("Title"));
    }

    #[test]
    fn already_renamed_is_stable() {
        let episode = extract_episode("Show S01E02- Title");
        assert_eq!(episode.file_name, "Show S01E02- Title");
        assert_eq!(episode.folder_key, "Show S01E02");
    }

    #[test]
    fn without_title() {
        let episode = extract_episode("Show S10E11");
        assert_eq!(episode.file_name, "Show S10E11");
        assert_eq!(episode.folder_key, "Show S10E11");
        assert_eq!(episode.title, None);
        assert_eq!(episode.code, Some((10, 11)));
    }

    #[test]
    fn different_titles_share_folder() {
        let first = extract_episode("Show S01E02 Part One");
        let second = extract_episode("Show S01E02 Extras");
        assert_eq!(first.folder_key, second.folder_key);
        assert_ne!(first.file_name, second.file_name);
    }

    #[test]
    fn no_marker_uses_bare_title() {
        let episode = extract_episode("Show Special");
        assert_eq!(episode.file_name, "Show Special");
        assert_eq!(episode.folder_key, "Show Special");
        assert_eq!(episode.code, None);
        assert_eq!(episode.title, None);
    }

    #[test]
    fn multi_word_title() {
        let episode = extract_episode("Some Show S03E09 The Long Goodbye");
        assert_eq!(episode.file_name, "Some Show S03E09- The Long Goodbye");
        assert_eq!(episode.folder_key, "Some Show S03E09");
        assert_eq!(episode.title.as_deref(), Some("The Long Goodbye"));
    }
}
