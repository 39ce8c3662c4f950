use jukebox_ratui::error::LibraryError;
use jukebox_ratui::library::{is_supported_audio, scan_paths};
use std::fs;
use std::path::Path;

fn touch(p: &Path) {
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(p, b"junk").expect("write");
}

#[test]
fn directories_are_walked_recursively_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(&dir.path().join("b.mp3"));
    touch(&dir.path().join("a.flac"));
    touch(&dir.path().join("notes.txt"));
    touch(&dir.path().join("disc2").join("c.ogg"));

    let tracks = scan_paths(&[dir.path().to_path_buf()]).expect("scan");
    let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn unreadable_tags_fall_back_to_file_stem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = dir.path().join("My Song.mp3");
    touch(&p);

    let tracks = scan_paths(&[p.clone()]).expect("scan");
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "My Song");
    assert!(tracks[0].artists.is_empty());
    assert_eq!(tracks[0].path, p);
}

#[test]
fn cover_image_is_attached() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(&dir.path().join("01.mp3"));
    touch(&dir.path().join("cover.jpg"));

    let tracks = scan_paths(&[dir.path().to_path_buf()]).expect("scan");
    assert_eq!(
        tracks[0].album_art.as_deref(),
        Some(dir.path().join("cover.jpg").as_path())
    );
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = scan_paths(&[dir.path().join("nope")]).unwrap_err();
    assert!(matches!(err, LibraryError::NotFound(_)));
}

#[test]
fn explicit_non_audio_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = dir.path().join("readme.md");
    touch(&p);
    let err = scan_paths(&[p]).unwrap_err();
    assert!(matches!(err, LibraryError::Unsupported(_)));
}

#[test]
fn extension_check_is_case_insensitive() {
    assert!(is_supported_audio(Path::new("x.MP3")));
    assert!(is_supported_audio(Path::new("x.Flac")));
    assert!(!is_supported_audio(Path::new("x.jpg")));
    assert!(!is_supported_audio(Path::new("noext")));
}
