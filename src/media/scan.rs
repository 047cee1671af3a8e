//! Scan a root directory for release folders and organize each one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use itertools::Itertools;
use walkdir::WalkDir;

use crate::media::{Config, DirectoryOrganizer, Outcome};
use crate::{print_bold, show_diff};

/// Aggregate counts for one scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Visible sub-directories found under the root.
    pub folders: usize,
    /// Folders classified as media releases.
    pub media: usize,
    pub shows: usize,
    pub movies: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Media folder organizer for a root directory.
#[derive(Debug)]
pub struct MediaTidy {
    organizer: DirectoryOrganizer,
}

impl MediaTidy {
    #[must_use]
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self {
            organizer: DirectoryOrganizer::new(root, config),
        }
    }

    #[must_use]
    pub const fn organizer(&self) -> &DirectoryOrganizer {
        &self.organizer
    }

    /// Organize every media folder directly under the root.
    ///
    /// # Errors
    /// Returns an error if the root cannot be read or organizing a folder fails.
    pub fn run(&self) -> Result<ScanSummary> {
        let start = Instant::now();
        let config = self.organizer.config();
        let root = self.organizer.root();
        if config.debug {
            println!("{self}");
        }

        let folders = list_folders(root)?;
        let mut summary = ScanSummary {
            folders: folders.len(),
            ..Default::default()
        };
        if folders.is_empty() {
            println!("No folders found");
            return Ok(summary);
        }

        let candidates: Vec<String> = folders
            .into_iter()
            .filter(|name| self.organizer.classifier().is_media_folder(name))
            .collect();

        summary.media = candidates.len();
        print_bold!("Media folders found: {}", candidates.len());

        for name in &candidates {
            match self.organizer.organize(name)? {
                Outcome::Show { title, season } => {
                    println!("{} {}", "Show:".bold().cyan(), format!("{title} / {season}").cyan());
                    show_diff(name, &title);
                    summary.shows += 1;
                }
                Outcome::Movie { title } => {
                    println!("{} {}", "Movie:".bold().magenta(), title.magenta());
                    show_diff(name, &title);
                    summary.movies += 1;
                }
                Outcome::Skipped => summary.skipped += 1,
            }
        }

        summary.elapsed = start.elapsed();
        self.print_summary(&summary);
        Ok(summary)
    }

    fn print_summary(&self, summary: &ScanSummary) {
        let message = format!(
            "{} {} and {} {} in {}",
            summary.shows,
            if summary.shows == 1 { "show" } else { "shows" },
            summary.movies,
            if summary.movies == 1 { "movie" } else { "movies" },
            crate::format_duration(summary.elapsed)
        );
        if self.organizer.config().dryrun {
            println!("Dryrun: would have organized {message}");
        } else {
            println!("{}", format!("Organized {message}").green());
        }
        if summary.skipped > 0 {
            println!("Skipped {} folder(s)", summary.skipped);
        }
    }
}

/// Names of the visible sub-directories directly under `root`, sorted case-insensitively.
///
/// # Errors
/// Returns an error if the root directory cannot be read.
pub fn list_folders(root: &Path) -> Result<Vec<String>> {
    let mut folders = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_entry(|e| !crate::is_hidden(e))
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            folders.push(crate::os_str_to_string(entry.file_name()));
        }
    }
    Ok(folders
        .into_iter()
        .sorted_by_key(|name| name.to_lowercase())
        .collect())
}

impl fmt::Display for MediaTidy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root: {}", self.organizer.root().display())?;
        write!(f, "{}", self.organizer.config())
    }
}
