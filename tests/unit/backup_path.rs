//! Unit tests for title sanitization and backup path generation

use std::path::PathBuf;
use velog_backup::output::{sanitize_title, BackupPaths};

#[test]
fn test_every_excluded_character_becomes_underscore() {
    for c in ['\\', '~', '#', '%', '&', '*', '{', '}', '/', ':', '<', '>', '?', '|', '"', ' '] {
        let title = format!("a{c}b");
        assert_eq!(sanitize_title(&title), "a_b", "character {c:?} not replaced");
    }
}

#[test]
fn test_multiple_occurrences_all_replaced() {
    assert_eq!(sanitize_title("C++: how? why? / when?"), "C++__how__why____when_");
}

#[test]
fn test_safe_characters_pass_through() {
    assert_eq!(sanitize_title("my-post.v2_final"), "my-post.v2_final");
    assert_eq!(sanitize_title("한글제목"), "한글제목");
}

#[test]
fn test_markdown_and_image_paths_share_one_directory() {
    let paths = BackupPaths::new("backup", "Rust: ownership & you");

    let dir = paths.post_dir();
    assert_eq!(
        dir,
        PathBuf::from("backup/content/Rust__ownership___you")
    );
    assert_eq!(paths.post_file().parent().unwrap(), dir);
    assert_eq!(paths.image_file("0.png").parent().unwrap(), dir);
    assert_eq!(
        paths.post_file().file_name().unwrap(),
        "Rust__ownership___you.md"
    );
}

#[test]
fn test_ensure_post_dir_is_idempotent() {
    let temp = tempfile::TempDir::new().unwrap();
    let paths = BackupPaths::new(temp.path(), "some post");

    paths.ensure_post_dir().unwrap();
    assert!(paths.post_dir().is_dir());

    // Second call must not error.
    paths.ensure_post_dir().unwrap();
}
