//! End-to-end tests running the organizer over a download directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use media_tidy::media::{Config, MediaTidy, PROVENANCE_FILE};

fn create_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).expect("Failed to create test file");
    path
}

fn create_dir(parent: &Path, name: &str) -> PathBuf {
    let path = parent.join(name);
    fs::create_dir_all(&path).expect("Failed to create test dir");
    path
}

/// All file paths under `root` relative to it, sorted.
fn tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("should be under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

fn populate_downloads(root: &Path) {
    let show = create_dir(root, "Some.Show.S01.1080p.WEB-DL.DDP5.1.H.264-FGT");
    create_file(&show, "Some.Show.S01E01.Pilot.1080p.WEB-DL.DDP5.1.H.264-FGT.mkv");
    create_file(&show, "Some.Show.S01E02.The.Return.1080p.WEB-DL.DDP5.1.H.264-FGT.mkv");
    create_file(&show, "RARBG.txt");

    let movie = create_dir(root, "The.Matrix.1999.1080p.BluRay.x264-SiGMA");
    create_file(&movie, "The.Matrix.1999.1080p.BluRay.x264-SiGMA.mp4");
    create_file(&movie, "RARBG_DO_NOT_MIRROR.exe");
    let subs = create_dir(&movie, "Subs");
    create_file(&subs, "English.srt");

    create_dir(root, "Documents");
    create_dir(root, ".git");
}

#[test]
fn organizes_download_directory() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    populate_downloads(temp.path());

    let summary = MediaTidy::new(temp.path().to_path_buf(), Config::default())
        .run()
        .expect("run should succeed");

    assert_eq!(summary.folders, 3);
    assert_eq!(summary.media, 2);
    assert_eq!(summary.shows, 1);
    assert_eq!(summary.movies, 1);

    assert_eq!(
        tree(temp.path()),
        vec![
            "Some Show/Season 1/Some Show S01E01/Some Show S01E01- Pilot.mkv",
            "Some Show/Season 1/Some Show S01E02/Some Show S01E02- The Return.mkv",
            "The Matrix/Subs/English.srt",
            "The Matrix/The Matrix.mp4",
            "The Matrix/info.txt",
        ]
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("The Matrix").join(PROVENANCE_FILE)).expect("should read provenance"),
        "The.Matrix.1999.1080p.BluRay.x264-SiGMA"
    );
    assert!(temp.path().join("Documents").is_dir());
    assert!(temp.path().join(".git").is_dir());
}

#[test]
fn second_season_accumulates_under_show_folder() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let first = create_dir(temp.path(), "Show.S01.720p.WEBRip.x265-DEFLATE");
    create_file(&first, "Show.S01E01.720p.WEBRip.x265-DEFLATE.mkv");

    MediaTidy::new(temp.path().to_path_buf(), Config::default())
        .run()
        .expect("first run should succeed");

    let second = create_dir(temp.path(), "Show.S02.720p.WEBRip.x265-DEFLATE");
    create_file(&second, "Show.S02E01.720p.WEBRip.x265-DEFLATE.mkv");

    let summary = MediaTidy::new(temp.path().to_path_buf(), Config::default())
        .run()
        .expect("second run should succeed");

    assert_eq!(summary.media, 1);
    assert_eq!(summary.shows, 1);
    assert!(!second.exists());
    assert_eq!(
        tree(temp.path()),
        vec![
            "Show/Season 1/Show S01E01/Show S01E01.mkv",
            "Show/Season 2/Show S02E01/Show S02E01.mkv",
        ]
    );
}

#[test]
fn rerun_leaves_organized_tree_unchanged() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    populate_downloads(temp.path());

    MediaTidy::new(temp.path().to_path_buf(), Config::default())
        .run()
        .expect("first run should succeed");
    let before = tree(temp.path());

    let summary = MediaTidy::new(temp.path().to_path_buf(), Config::default())
        .run()
        .expect("second run should succeed");

    assert_eq!(tree(temp.path()), before);
    assert_eq!(summary.media, 0);
}

#[test]
fn dryrun_changes_nothing() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    populate_downloads(temp.path());
    let before = tree(temp.path());

    let config = Config {
        dryrun: true,
        ..Config::default()
    };
    let summary = MediaTidy::new(temp.path().to_path_buf(), config)
        .run()
        .expect("dryrun should succeed");

    assert_eq!(summary.shows, 1);
    assert_eq!(summary.movies, 1);
    assert_eq!(tree(temp.path()), before);
}
