//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use picker_common::{Catalog, PickerError, Session, SessionOptions, DEFAULT_EXTENSIONS};
use std::path::Path;
use tempfile::tempdir;
use thumb_picker::error::ThumbPickerError;
use thumb_picker::status;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = Catalog::build(Path::new("/nonexistent/path/12345"), DEFAULT_EXTENSIONS);
    let err = result.unwrap_err();
    assert!(matches!(err, PickerError::NotFound(_)));

    // CLI側では「開かない」扱い
    let err: ThumbPickerError = err.into();
    assert!(err.is_not_found());
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = Catalog::build(dir.path(), DEFAULT_EXTENSIONS);

    // 空フォルダはエラーではなく空のカタログを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// クリップのないフォルダのstatus
#[test]
fn test_status_folder_no_clips() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("frame.png"), "png").unwrap();

    let status = status::collect(dir.path(), &SessionOptions::default()).unwrap();
    assert_eq!(status.catalog_len, 0);
    assert!(status.state_dir.is_none());
}

/// statusで存在しないフォルダ
#[test]
fn test_status_nonexistent_folder() {
    let err = status::collect(Path::new("/nonexistent/path/12345"), &SessionOptions::default()).unwrap_err();
    assert!(err.is_not_found());
}

/// 書き込みエラーは「開かない」扱いにしない
#[test]
fn test_write_error_is_not_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("a.gif"), "gif").unwrap();

    let mut session = Session::default();
    session.open_project(dir.path()).unwrap();
    std::fs::remove_dir_all(session.state_dir().unwrap()).unwrap();

    let err: ThumbPickerError = session.request_advance().unwrap_err().into();
    assert!(!err.is_not_found());
    assert!(matches!(err, ThumbPickerError::Picker(PickerError::IoWrite { .. })));
}

/// 透過的エラーなのでメッセージがそのまま表示される
#[test]
fn test_error_chain_transparent() {
    let err: ThumbPickerError = PickerError::Config("page_size must be at least 1".to_string()).into();
    let display = format!("{}", err);
    assert_eq!(display, "Config error: page_size must be at least 1");
}

/// 入力エラーのメッセージ
#[test]
fn test_prompt_error_display() {
    let err = ThumbPickerError::Prompt("stdin closed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("入力エラー"));
    assert!(display.contains("stdin closed"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ThumbPickerError = io_err.into();

    assert!(matches!(err, ThumbPickerError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}
