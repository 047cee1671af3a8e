//! Restructure a single release folder into the canonical layout.
//!
//! Shows end up as `Show/Season N/Show SxxExx- Title/file.ext`,
//! movies as `Movie/Movie.ext` with an `info.txt` holding the original folder name.
//! Every path is composed from the scan root, the process working directory is never changed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use crate::media::episode::{extract_episode, extract_season};
use crate::media::{Config, MediaClassifier, MediaKind, NameNormalizer};
use crate::{print_warning, show_diff};

/// Provenance file written into every organized movie folder.
pub const PROVENANCE_FILE: &str = "info.txt";

/// Subtitle directory that is kept as is inside movie folders.
const SUBTITLE_DIRECTORY: &str = "Subs";

/// Result of organizing one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Show { title: String, season: String },
    Movie { title: String },
    Skipped,
}

/// Moves, renames and prunes the contents of release folders under a root directory.
#[derive(Debug)]
pub struct DirectoryOrganizer {
    root: PathBuf,
    config: Config,
    normalizer: NameNormalizer,
    classifier: MediaClassifier,
}

impl DirectoryOrganizer {
    #[must_use]
    pub fn new(root: PathBuf, config: Config) -> Self {
        let normalizer = NameNormalizer::new(config.catalog.clone());
        let classifier = MediaClassifier::new(config.catalog.clone());
        Self {
            root,
            config,
            normalizer,
            classifier,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn classifier(&self) -> &MediaClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Classify a folder directly under the root and organize it.
    ///
    /// Folders that are not media releases are left alone.
    ///
    /// # Errors
    /// Returns an error if a filesystem operation fails.
    pub fn organize(&self, folder_name: &str) -> Result<Outcome> {
        match self.classifier.classify(folder_name) {
            Some(MediaKind::Show) => self.organize_show(folder_name),
            Some(MediaKind::Movie) => self.organize_movie(folder_name),
            None => Ok(Outcome::Skipped),
        }
    }

    /// Organize a TV show season folder.
    ///
    /// # Errors
    /// Returns an error if a filesystem operation fails.
    pub fn organize_show(&self, folder_name: &str) -> Result<Outcome> {
        let source = self.root.join(folder_name);
        let normalized = self.normalizer.normalize_entry(&self.root, folder_name);
        let Some(season) = extract_season(&normalized) else {
            print_warning!("No season marker left in '{normalized}', skipping: {folder_name}");
            return Ok(Outcome::Skipped);
        };
        if season.title.is_empty() {
            print_warning!("Could not get a show title, skipping: {folder_name}");
            return Ok(Outcome::Skipped);
        }

        let show_dir = self.root.join(&season.title);
        let content_dir = self.ensure_folder(&source, &show_dir)?;
        let season_dir = show_dir.join(&season.label);
        self.create_dir_if_missing(&season_dir)?;

        for path in Self::list_entries(&content_dir)? {
            if path.is_dir() {
                continue;
            }
            let (stem, extension) = crate::get_normalized_file_name_and_extension(&path)?;
            let extension_lower = extension.to_lowercase();
            if self.config.show_junk_extensions.contains(&extension_lower) {
                self.remove_file(&path)?;
                continue;
            }
            if !self.config.is_video_extension(&extension_lower) {
                continue;
            }

            let episode = extract_episode(&self.normalizer.normalize(&stem));
            if episode.file_name.is_empty() {
                print_warning!("Could not get an episode name, skipping: {}", self.relative(&path));
                continue;
            }
            let episode_dir = season_dir.join(&episode.folder_key);
            self.create_dir_if_missing(&episode_dir)?;
            let target = episode_dir.join(format!("{}.{extension}", episode.file_name));
            self.move_path(&path, &target)?;
        }

        Ok(Outcome::Show {
            title: season.title,
            season: season.label,
        })
    }

    /// Organize a movie folder.
    ///
    /// # Errors
    /// Returns an error if a filesystem operation fails.
    pub fn organize_movie(&self, folder_name: &str) -> Result<Outcome> {
        let source = self.root.join(folder_name);
        let title = self.normalizer.normalize_entry(&self.root, folder_name);
        if title.is_empty() {
            print_warning!("Could not get a movie title, skipping: {folder_name}");
            return Ok(Outcome::Skipped);
        }

        let movie_dir = self.root.join(&title);
        let content_dir = self.ensure_folder(&source, &movie_dir)?;

        for path in Self::list_entries(&content_dir)? {
            if path.is_dir() {
                if self.config.verbose && crate::path_to_filename_string(&path) == SUBTITLE_DIRECTORY {
                    println!("Keeping subtitles: {}", self.relative(&path));
                }
                continue;
            }
            let extension = crate::path_to_file_extension_string(&path);
            if self.config.movie_junk_extensions.contains(&extension) {
                self.remove_file(&path)?;
                continue;
            }
            if self.config.is_video_extension(&extension) {
                let target = movie_dir.join(format!("{title}.{extension}"));
                self.move_path(&path, &target)?;
            }
        }

        self.write_provenance(&movie_dir.join(PROVENANCE_FILE), folder_name)?;

        Ok(Outcome::Movie { title })
    }

    /// Bring `source` to the `target` folder name.
    ///
    /// Renames when the target does not exist yet,
    /// otherwise moves the source contents into the existing target.
    /// Returns the directory that currently holds the contents.
    fn ensure_folder(&self, source: &Path, target: &Path) -> Result<PathBuf> {
        if source == target {
            return Ok(target.to_path_buf());
        }
        if target.is_file() {
            anyhow::bail!(
                "Cannot organize {}: a file with the same name already exists",
                self.relative(target)
            );
        }

        if !target.exists() || Self::is_same_entry(source, target) {
            self.move_path(source, target)?;
        } else {
            self.merge_into(source, target)?;
        }

        if self.config.dryrun {
            Ok(source.to_path_buf())
        } else {
            Ok(target.to_path_buf())
        }
    }

    /// Move every entry of `source` into the existing `target` directory,
    /// then remove `source` if nothing was left behind.
    fn merge_into(&self, source: &Path, target: &Path) -> Result<()> {
        if self.config.verbose || self.config.dryrun {
            println!(
                "{} {} -> {}",
                self.action_label("Merge:").cyan(),
                self.relative(source),
                self.relative(target)
            );
        }
        for path in Self::list_entries(source)? {
            let destination = target.join(crate::path_to_filename_string(&path));
            self.move_path(&path, &destination)?;
        }
        if !self.config.dryrun && crate::is_directory_empty(source) {
            fs::remove_dir(source)
                .with_context(|| format!("Failed to remove merged directory {}", source.display()))?;
        }
        Ok(())
    }

    /// Rename or move a file or directory.
    ///
    /// Existing targets are skipped unless overwrite is enabled.
    /// Returns true if the path was moved.
    fn move_path(&self, from: &Path, to: &Path) -> Result<bool> {
        if from == to {
            return Ok(false);
        }
        // Case or Unicode form variants of one entry on a case-insensitive file system
        let same_entry = Self::is_same_entry(from, to);
        if !same_entry && to.exists() && (to.is_dir() || !self.config.overwrite) {
            print_warning!("Skipping existing: {}", self.relative(to));
            return Ok(false);
        }

        if self.config.verbose || self.config.dryrun {
            println!("{}", self.action_label(Self::action_name(from, to)).magenta());
            show_diff(&self.relative(from), &self.relative(to));
        }
        if self.config.dryrun {
            return Ok(true);
        }

        let result = if same_entry {
            Self::rename_with_temp_file(from, to)
        } else {
            fs::rename(from, to)
        };
        result.with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
        Ok(true)
    }

    /// Create the directory unless it already exists.
    fn create_dir_if_missing(&self, path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        if self.config.verbose || self.config.dryrun {
            println!("{} {}", self.action_label("Create:").green(), self.relative(path));
        }
        if !self.config.dryrun {
            fs::create_dir(path).with_context(|| format!("Failed to create directory {}", path.display()))?;
        }
        Ok(true)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if self.config.verbose || self.config.dryrun {
            println!("{} {}", self.action_label("Delete:").red(), self.relative(path));
        }
        if !self.config.dryrun {
            fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))?;
        }
        Ok(())
    }

    /// Write the original folder name, replacing any previous provenance file.
    fn write_provenance(&self, path: &Path, original_name: &str) -> Result<()> {
        if self.config.verbose || self.config.dryrun {
            println!("{} {}", self.action_label("Write:").yellow(), self.relative(path));
        }
        if !self.config.dryrun {
            fs::write(path, original_name).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }

    /// Direct entries of a directory, sorted by name.
    fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    /// Rename with an intermediate temp name to work around case-insensitive file systems.
    fn rename_with_temp_file(from: &Path, to: &Path) -> std::io::Result<()> {
        let temp = crate::append_extension_to_path(to.to_path_buf(), "tmp");
        fs::rename(from, &temp)?;
        fs::rename(&temp, to)
    }

    /// True if both paths resolve to the same entry on disk,
    /// which happens for case variants on a case-insensitive file system.
    #[cfg(unix)]
    fn is_same_entry(a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn is_same_entry(a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Label for a move inside the same directory versus into another one.
    fn action_name(from: &Path, to: &Path) -> &'static str {
        if from.parent() == to.parent() { "Rename:" } else { "Move:" }
    }

    fn action_label(&self, action: &str) -> ColoredString {
        if self.config.dryrun {
            format!("Dryrun {action}").bold()
        } else {
            action.bold()
        }
    }

    fn relative(&self, path: &Path) -> String {
        crate::get_relative_path_or_filename(path, &self.root)
    }
}
