//! `config` サブコマンドのテスト
//!
//! 実バイナリを一時 HOME で起動して検証

use picker_common::{Config, DEFAULT_PAGE_SIZE};
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_config(home: &Path, content: &str) -> std::path::PathBuf {
    let path = home.join(".config").join("thumb-picker").join("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn thumb_picker(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_thumb-picker"));
    cmd.env("HOME", home);
    cmd
}

/// 不正な設定ファイルでも --reset で初期値に戻せる
#[test]
fn test_reset_repairs_invalid_config() {
    let home = tempdir().unwrap();
    let path = write_config(home.path(), r#"{ "pageSize": 0 }"#);

    let output = thumb_picker(home.path())
        .args(["config", "--reset"])
        .output()
        .expect("failed to run thumb-picker");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config, Config::default());
}

/// 壊れた JSON でも --set-page-size で上書きできる
#[test]
fn test_set_overwrites_unparsable_config() {
    let home = tempdir().unwrap();
    let path = write_config(home.path(), "{ not json");

    let output = thumb_picker(home.path())
        .args(["config", "--set-page-size", "9"])
        .output()
        .expect("failed to run thumb-picker");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.page_size, 9);
}

/// open は不正な設定を黙って無視しない
#[test]
fn test_open_rejects_invalid_config() {
    let home = tempdir().unwrap();
    write_config(home.path(), r#"{ "pageSize": 0 }"#);
    let folder = tempdir().unwrap();

    let output = thumb_picker(home.path())
        .arg("open")
        .arg(folder.path())
        .output()
        .expect("failed to run thumb-picker");
    assert!(!output.status.success());
}
