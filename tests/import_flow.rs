//! End-to-end tests for the scan → cluster → organize pipeline on a real
//! (temporary) directory tree, with no device, network, or remote involved.

use chrono::{Duration, Local, TimeZone};
use sd_import_tool::trips::{cluster, organize_trips, scan_media_files};
use std::fs::{self, File, FileTimes};
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempDir;

/// Create a file and set its modification time to the given local date/time
fn create_dated_file(path: &Path, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"media").unwrap();

    let dt = Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
    let file = File::options().write(true).open(path).unwrap();
    file.set_times(FileTimes::new().set_modified(SystemTime::from(dt)))
        .unwrap();
}

#[test]
fn five_files_over_eight_days_split_on_two_day_gaps() {
    let volume = TempDir::new().unwrap();
    let dcim = volume.path().join("DCIM");

    // Days 1-3 are one trip; the 4-day gap to day 7 starts a second one.
    create_dated_file(&dcim.join("IMG_0001.jpg"), 2024, 6, 1, 10, 0, 0);
    create_dated_file(&dcim.join("IMG_0002.jpg"), 2024, 6, 2, 11, 0, 0);
    create_dated_file(&dcim.join("IMG_0003.jpg"), 2024, 6, 3, 12, 0, 0);
    create_dated_file(&dcim.join("IMG_0004.jpg"), 2024, 6, 7, 9, 0, 0);
    create_dated_file(&dcim.join("IMG_0005.mov"), 2024, 6, 8, 18, 0, 0);

    let files = scan_media_files(volume.path()).unwrap();
    assert_eq!(files.len(), 5);

    let trips = cluster(files, Duration::days(2));
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].len(), 3);
    assert_eq!(trips[1].len(), 2);

    let labels = vec![None, None];
    let dirs = organize_trips(&trips, &labels, volume.path()).unwrap();
    assert_eq!(
        dirs,
        vec![
            "trip_1_20240601_20240603".to_string(),
            "trip_2_20240607_20240608".to_string()
        ]
    );

    for dir in &dirs {
        assert!(volume.path().join(dir).is_dir());
    }
    assert_eq!(
        fs::read_dir(volume.path().join(&dirs[0])).unwrap().count(),
        3
    );
    assert_eq!(
        fs::read_dir(volume.path().join(&dirs[1])).unwrap().count(),
        2
    );
    // Source locations are gone: the moves are physical
    assert!(!dcim.join("IMG_0001.jpg").exists());
    assert!(!dcim.join("IMG_0005.mov").exists());
}

#[test]
fn location_label_shapes_the_directory_name() {
    let volume = TempDir::new().unwrap();
    create_dated_file(&volume.path().join("a.jpg"), 2024, 6, 1, 10, 0, 0);

    let files = scan_media_files(volume.path()).unwrap();
    let trips = cluster(files, Duration::days(2));
    let labels = vec![Some("Seattle_and_more".to_string())];

    let dirs = organize_trips(&trips, &labels, volume.path()).unwrap();
    assert_eq!(dirs, vec!["Seattle_and_more_20240601_20240601".to_string()]);
}

#[test]
fn colliding_names_from_different_folders_both_survive() {
    let volume = TempDir::new().unwrap();

    // Same filename in two camera folders, both within one trip
    create_dated_file(&volume.path().join("100CANON/IMG_0001.jpg"), 2024, 6, 1, 9, 0, 0);
    create_dated_file(&volume.path().join("101CANON/IMG_0001.jpg"), 2024, 6, 1, 14, 0, 0);

    let files = scan_media_files(volume.path()).unwrap();
    let trips = cluster(files, Duration::days(2));
    assert_eq!(trips.len(), 1);

    let dirs = organize_trips(&trips, &[None], volume.path()).unwrap();
    let dest = volume.path().join(&dirs[0]);

    let mut names: Vec<String> = fs::read_dir(&dest)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    assert_eq!(names.len(), 2, "both files must survive the collision");
    assert_eq!(names[0], "20240601_140000_IMG_0001.jpg");
    assert_eq!(names[1], "IMG_0001.jpg");
}

#[test]
fn empty_volume_short_circuits_before_any_mutation() {
    let volume = TempDir::new().unwrap();
    fs::write(volume.path().join("notes.txt"), b"not media").unwrap();

    let files = scan_media_files(volume.path()).unwrap();
    assert!(files.is_empty());
    assert!(cluster(files, Duration::days(2)).is_empty());

    // The non-media file is untouched
    assert!(volume.path().join("notes.txt").exists());
}

#[test]
fn reorganizing_an_already_organized_volume_is_stable() {
    let volume = TempDir::new().unwrap();
    create_dated_file(&volume.path().join("a.jpg"), 2024, 6, 1, 10, 0, 0);
    create_dated_file(&volume.path().join("b.jpg"), 2024, 6, 2, 10, 0, 0);

    let first = organize_trips(
        &cluster(scan_media_files(volume.path()).unwrap(), Duration::days(2)),
        &[None],
        volume.path(),
    )
    .unwrap();

    // A second pass finds the same files inside the trip directory and
    // produces the same trip boundaries and directory name.
    let second = organize_trips(
        &cluster(scan_media_files(volume.path()).unwrap(), Duration::days(2)),
        &[None],
        volume.path(),
    )
    .unwrap();

    assert_eq!(first, second);
    let dest = volume.path().join(&first[0]);
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 2);
}
