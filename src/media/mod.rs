//! Media release folder organizing.
//!
//! Classifies downloaded release folders as shows or movies,
//! strips release noise from their names and moves the contents
//! into a `Show/Season N/Show SxxExx/` or `Movie/Movie.ext` layout.

mod catalog;
mod classify;
mod config;
pub mod episode;
mod normalize;
mod organize;
mod scan;

pub use catalog::{TokenCatalog, TokenCategory};
pub use classify::{MediaClassifier, MediaKind};
pub use config::{Config, MediaTidyConfig};
pub use episode::{EpisodeInfo, SeasonInfo, extract_episode, extract_season};
pub use normalize::NameNormalizer;
pub use organize::{DirectoryOrganizer, Outcome, PROVENANCE_FILE};
pub use scan::{MediaTidy, ScanSummary, list_folders};
